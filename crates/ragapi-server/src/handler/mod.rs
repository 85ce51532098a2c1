//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust
//! use axum::Router;
//! use ragapi_core::mock::{MockGenerationProvider, MockRetrievalProvider};
//! use ragapi_server::handler::routes;
//! use ragapi_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use ragapi_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::new(
//!     ServiceConfig::default(),
//!     MockRetrievalProvider::new(["Paris is the capital of France."]).into_service(),
//!     MockGenerationProvider::default().to_service(),
//! );
//!
//! let app: Router = routes()
//!     .with_state(state)
//!     .with_open_api(OpenApiConfig::default());
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod info;
mod monitors;
mod query;
pub mod request;
pub mod response;
mod stats;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with every route of the service.
///
/// Unknown paths answer with a JSON 404 body.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(info::routes())
        .merge(monitors::routes())
        .merge(stats::routes())
        .merge(query::routes())
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;
    use ragapi_core::mock::{MockGenerationProvider, MockRetrievalProvider};

    use crate::handler::routes;
    use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns state backed by the given mock providers.
    pub fn create_test_state(
        retrieval: MockRetrievalProvider,
        generation: &MockGenerationProvider,
    ) -> ServiceState {
        ServiceState::new(
            ServiceConfig::default(),
            retrieval.into_service(),
            generation.to_service(),
        )
    }

    /// Returns a new [`TestServer`] serving every route with the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes()
            .with_state(state)
            .with_open_api(OpenApiConfig::default());
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with the given mock providers.
    pub fn create_test_server(
        retrieval: MockRetrievalProvider,
        generation: &MockGenerationProvider,
    ) -> anyhow::Result<TestServer> {
        create_test_server_with_state(create_test_state(retrieval, generation))
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server(
            MockRetrievalProvider::default(),
            &MockGenerationProvider::default(),
        )?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() -> anyhow::Result<()> {
        let server = create_test_server(
            MockRetrievalProvider::default(),
            &MockGenerationProvider::default(),
        )?;

        let response = server.get("/missing").await;
        response.assert_status_not_found();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn specification_lists_routes() -> anyhow::Result<()> {
        let server = create_test_server(
            MockRetrievalProvider::default(),
            &MockGenerationProvider::default(),
        )?;

        let spec = server.get("/openapi.json").await.json::<serde_json::Value>();
        for path in ["/", "/health", "/stats", "/query"] {
            assert!(spec["paths"][path].is_object(), "missing {path}");
        }
        assert!(spec["paths"]["/query"]["post"].is_object());
        Ok(())
    }
}
