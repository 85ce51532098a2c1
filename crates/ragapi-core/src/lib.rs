#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for retrieval operations.
pub const TRACING_TARGET_RETRIEVAL: &str = "ragapi_core::retrieval";

/// Tracing target for generation operations.
pub const TRACING_TARGET_GENERATION: &str = "ragapi_core::generation";

/// Tracing target for embedding operations.
pub const TRACING_TARGET_EMBEDDING: &str = "ragapi_core::embedding";

mod embedding;
mod error;
mod generation;
mod retrieval;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use crate::embedding::{EmbeddingProvider, EmbeddingService};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::generation::{GenerationProvider, GenerationService};
pub use crate::retrieval::{RetrievalProvider, RetrievalService};
