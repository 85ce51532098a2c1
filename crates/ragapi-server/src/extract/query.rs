use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Tracing target for query string extraction.
const TRACING_TARGET: &str = "ragapi_server::extract::query";

/// Query string extractor that rejects with a JSON [`Error`].
///
/// Missing parameters and type mismatches produce a `400 Bad Request`.
///
/// ```rust,no_run
/// use ragapi_server::extract::Query;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Search {
///     q: String,
///     limit: Option<u32>,
/// }
///
/// async fn search(Query(params): Query<Search>) -> String {
///     params.q
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Creates a new [`Query`] wrapper around the provided query parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes the wrapper and returns the inner query parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumQuery::<T>::inferred_early_responses(ctx, operation)
    }
}

/// Maps a rejected query string to a 400 naming the missing parameter when
/// serde reports one.
fn enhance_query_error(rejection: QueryRejection) -> Error {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "Query string rejected"
    );

    let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
        return ErrorKind::BadRequest.with_message("Invalid query parameters");
    };

    let serde_message = err.body_text();
    let client_message = match missing_parameter(&serde_message) {
        Some(name) => format!("Missing required query parameter '{name}'"),
        None => "Invalid query parameter type".to_owned(),
    };

    ErrorKind::BadRequest
        .with_message(client_message)
        .with_context(serde_message)
}

/// Returns the parameter named by a serde "missing field `name`" message.
fn missing_parameter(serde_message: &str) -> Option<&str> {
    let (_, rest) = serde_message.split_once("missing field `")?;
    rest.split_once('`').map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Params {
        q: String,
        n: Option<u32>,
    }

    async fn extract(uri: &str) -> Result<Query<Params>, Error> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Query::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn finds_missing_parameter_name() {
        assert_eq!(
            missing_parameter("Failed to deserialize query string: missing field `q`"),
            Some("q")
        );
        assert_eq!(missing_parameter("invalid digit found in string"), None);
    }

    #[tokio::test]
    async fn parses_query_string() -> anyhow::Result<()> {
        let Query(params) = extract("/query?q=hello%20world&n=3").await?;
        assert_eq!(params.q, "hello world");
        assert_eq!(params.n, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn missing_parameter_is_bad_request() {
        let error = extract("/query?n=3").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Missing required query parameter 'q'"));
    }

    #[tokio::test]
    async fn invalid_type_is_bad_request() {
        let error = extract("/query?q=x&n=abc").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Invalid query parameter type"));
    }
}
