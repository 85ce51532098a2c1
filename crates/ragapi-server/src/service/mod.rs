//! Application state and dependency injection.

mod config;
mod info;
mod rag;
mod state;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, ServiceConfigBuilderError};
pub use crate::service::info::ApiInfo;
pub use crate::service::rag::{RagAnswer, RagService};
pub use crate::service::state::ServiceState;
