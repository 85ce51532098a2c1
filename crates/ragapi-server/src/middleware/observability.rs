//! Observability middleware for request tracing and correlation.

use axum::Router;
use axum::http::header::{self, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates a UUID request id (unless the client sent one), opens a
    /// tracing span per request, echoes the id on the response and marks the
    /// authorization and cookie headers as sensitive.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    fn server() -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn generates_request_id() -> anyhow::Result<()> {
        let response = server()?.get("/").await;
        let request_id = response.header(REQUEST_ID_HEADER);
        assert!(!request_id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn propagates_client_request_id() -> anyhow::Result<()> {
        let response = server()?
            .get("/")
            .add_header(REQUEST_ID_HEADER, HeaderValue::from_static("client-supplied"))
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "client-supplied");
        Ok(())
    }
}
