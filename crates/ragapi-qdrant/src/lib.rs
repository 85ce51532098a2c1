#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for store operations.
pub const TRACING_TARGET: &str = "ragapi_qdrant::store";

mod config;
mod error;
mod payload;
mod store;

pub use crate::config::QdrantConfig;
pub use crate::error::{Error, Result};
pub use crate::store::QdrantStore;
