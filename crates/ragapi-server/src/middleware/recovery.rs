//! Turns timeouts and handler panics into JSON error bodies.
//!
//! A question costs one embedding call and one generation call against Ollama,
//! so the request deadline has to outlast the model timeout. Otherwise a slow
//! model surfaces as 504 rather than the 502 the Ollama client reports.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::ErrorKind;

const TRACING_TARGET: &str = "ragapi_server::middleware::recovery";

/// Default request deadline in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 180;

/// Request deadline applied around every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with 504.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RecoveryConfig {
    /// Returns the request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Answers with 504 past the deadline and with 500 when a handler panics.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let deadline = config.request_timeout();
        let layers = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(move |error: tower::BoxError| async move {
                recover_from_error(&error, deadline)
            }))
            .layer(CatchPanicLayer::custom(recover_from_panic))
            .layer(TimeoutLayer::new(deadline));

        self.layer(layers)
    }
}

fn recover_from_error(error: &tower::BoxError, deadline: Duration) -> Response {
    if error.is::<Elapsed>() {
        tracing::warn!(
            target: TRACING_TARGET,
            deadline_secs = deadline.as_secs(),
            "Request exceeded its deadline"
        );
        return ErrorKind::GatewayTimeout
            .with_message("Request timed out")
            .into_response();
    }

    tracing::error!(target: TRACING_TARGET, %error, "Middleware failed");
    ErrorKind::InternalServerError.into_response()
}

fn recover_from_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(target: TRACING_TARGET, reason, "Handler panicked");
    ErrorKind::InternalServerError.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;
    use crate::handler::response::ErrorResponse;

    async fn ok() -> &'static str {
        "ok"
    }

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "late"
    }

    fn server(request_timeout: u64) -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/ok", get(ok))
            .route("/boom", get(boom))
            .route("/slow", get(slow))
            .with_recovery(&RecoveryConfig { request_timeout });
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn passes_through_successful_requests() -> anyhow::Result<()> {
        let server = server(DEFAULT_REQUEST_TIMEOUT)?;
        server.get("/ok").await.assert_text("ok");
        Ok(())
    }

    #[tokio::test]
    async fn panics_become_500() -> anyhow::Result<()> {
        let server = server(DEFAULT_REQUEST_TIMEOUT)?;

        let response = server.get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "internal_server_error");
        Ok(())
    }

    #[tokio::test]
    async fn timeouts_become_504() -> anyhow::Result<()> {
        let server = server(1)?;

        let response = server.get("/slow").await;
        response.assert_status(StatusCode::GATEWAY_TIMEOUT);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "gateway_timeout");
        assert_eq!(body.detail, "Request timed out");
        Ok(())
    }
}
