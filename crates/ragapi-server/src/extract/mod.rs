//! Request extractors and response wrappers with JSON error rejections.
//!
//! - [`Json`] serializes handler responses and documents them in OpenAPI.
//! - [`Query`] deserializes the query string, rejecting with a 400 [`Error`].
//! - [`ValidateQuery`] additionally runs `validator` rules.
//!
//! [`Error`]: crate::handler::Error

mod json;
mod query;
mod validated_query;

pub use self::json::Json;
pub use self::query::Query;
pub use self::validated_query::ValidateQuery;
