//! Question answering request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::validations::validation_error;

/// Number of documents retrieved when `n_results` is omitted.
pub const DEFAULT_N_RESULTS: i64 = 1;

/// Smallest accepted `n_results`.
pub const MIN_N_RESULTS: i64 = 1;

/// Largest accepted `n_results`.
pub const MAX_N_RESULTS: i64 = 10;

/// Query string parameters of `POST /query`.
///
/// The question is checked before `n_results`. When it is blank, only that
/// failure is reported.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// Question to answer. Must contain a non-whitespace character.
    pub q: String,

    /// Number of documents to use as context, between 1 and 10.
    #[serde(default = "default_n_results")]
    pub n_results: i64,
}

impl Validate for QueryParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(error) = validate_question(&self.q) {
            errors.add("q", error);
        } else if let Err(error) = validate_n_results(self.n_results) {
            errors.add("n_results", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl QueryParams {
    /// Creates parameters for `q` with the default number of results.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            n_results: DEFAULT_N_RESULTS,
        }
    }

    /// Sets the number of documents to retrieve.
    pub fn with_n_results(mut self, n_results: i64) -> Self {
        self.n_results = n_results;
        self
    }

    /// Returns `n_results` as a retrieval limit.
    ///
    /// Only meaningful after validation, negative values clamp to zero.
    pub fn limit(&self) -> usize {
        usize::try_from(self.n_results).unwrap_or_default()
    }
}

fn default_n_results() -> i64 {
    DEFAULT_N_RESULTS
}

fn validate_question(q: &str) -> Result<(), ValidationError> {
    if q.trim().is_empty() {
        return Err(validation_error("blank", "Query cannot be empty"));
    }
    Ok(())
}

fn validate_n_results(n_results: i64) -> Result<(), ValidationError> {
    if !(MIN_N_RESULTS..=MAX_N_RESULTS).contains(&n_results) {
        return Err(validation_error(
            "range",
            "n_results must be between 1 and 10",
        ));
    }
    Ok(())
}
