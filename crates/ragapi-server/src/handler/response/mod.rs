//! Response types for HTTP handlers.

mod errors;
mod info;
mod monitors;
mod query;
mod stats;

pub use errors::ErrorResponse;
pub use info::ServiceInfo;
pub use monitors::HealthStatus;
pub use query::QueryAnswer;
pub use stats::CollectionStats;
