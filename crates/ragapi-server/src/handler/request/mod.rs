//! Request types for HTTP handlers.

mod query;
mod validations;

pub use query::{DEFAULT_N_RESULTS, MAX_N_RESULTS, MIN_N_RESULTS, QueryParams};
