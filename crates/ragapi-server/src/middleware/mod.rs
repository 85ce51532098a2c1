//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is exposed as a router extension trait:
//!
//! ```rust,no_run
//! use axum::Router;
//! use ragapi_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
pub use specification::{API_DESCRIPTION, API_TITLE, OpenApiConfig, RouterOpenApiExt};
