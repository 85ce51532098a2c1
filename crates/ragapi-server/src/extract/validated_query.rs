//! Validated query string extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Query;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "ragapi_server::extract::validate";

/// Query string extractor that runs `validator` rules after deserialization.
///
/// Also see [`Query`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateQuery<T>(pub T);

impl<T> ValidateQuery<T> {
    /// Creates a new instance of [`ValidateQuery`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for ValidateQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

impl From<ValidationErrors> for Error {
    /// Uses each rule's own message, ordered by field name and joined by `". "`.
    fn from(errors: ValidationErrors) -> Self {
        let mut failures: Vec<_> = errors.field_errors().into_iter().collect();
        failures.sort_by(|(a, _), (b, _)| a.cmp(b));

        let messages: Vec<String> = failures
            .iter()
            .flat_map(|(field, rules)| rules.iter().map(move |rule| (field, rule)))
            .map(|(field, rule)| match &rule.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for '{field}'"),
            })
            .collect();

        tracing::warn!(
            target: TRACING_TARGET,
            failures = ?messages,
            "Query parameters failed validation"
        );

        let message = if messages.is_empty() {
            "Validation failed".to_owned()
        } else {
            messages.join(". ")
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateQuery<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Query::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Query::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::handler::request::QueryParams;

    async fn extract(uri: &str) -> Result<ValidateQuery<QueryParams>, Error> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidateQuery::<QueryParams>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_valid_query() -> anyhow::Result<()> {
        let ValidateQuery(params) = extract("/query?q=hello&n_results=4").await?;
        assert_eq!(params.q, "hello");
        assert_eq!(params.n_results, 4);
        Ok(())
    }

    #[tokio::test]
    async fn blank_question_uses_rule_message() {
        let error = extract("/query?q=%20%20").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Query cannot be empty"));
    }

    #[tokio::test]
    async fn blank_question_masks_n_results_failure() {
        let error = extract("/query?q=%20%20&n_results=0").await.unwrap_err();
        assert_eq!(error.message(), Some("Query cannot be empty"));
    }

    #[tokio::test]
    async fn out_of_range_n_results_uses_rule_message() {
        let error = extract("/query?q=hello&n_results=11").await.unwrap_err();
        assert_eq!(error.message(), Some("n_results must be between 1 and 10"));
    }
}
