//! Service identity handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;

use crate::extract::Json;
use crate::handler::response::ServiceInfo;
use crate::service::{ApiInfo, ServiceState};

/// Tracing target for service identity requests.
const TRACING_TARGET: &str = "ragapi_server::handler::info";

/// Returns the service name, version and documentation path.
#[tracing::instrument(skip_all)]
async fn service_info(State(api_info): State<ApiInfo>) -> Json<ServiceInfo> {
    tracing::debug!(target: TRACING_TARGET, "Service info requested");

    Json(ServiceInfo {
        name: api_info.name,
        version: api_info.version,
        docs: api_info.docs,
    })
}

fn service_info_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get service info")
        .description("Returns the service name, version and the path of the API reference.")
        .response::<200, Json<ServiceInfo>>()
}

/// Returns a [`Router`] with the service identity route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/", get_with(service_info, service_info_docs))
        .with_path_items(|item| item.tag("Service"))
}

#[cfg(test)]
mod tests {
    use ragapi_core::mock::{MockGenerationProvider, MockRetrievalProvider};

    use super::*;
    use crate::handler::test::{create_test_server_with_state, create_test_state};

    #[tokio::test]
    async fn reports_identity() -> anyhow::Result<()> {
        let state = create_test_state(
            MockRetrievalProvider::default(),
            &MockGenerationProvider::default(),
        );
        let server = create_test_server_with_state(state)?;

        let response = server.get("/").await;
        response.assert_status_ok();

        let info = response.json::<ServiceInfo>();
        assert_eq!(info.name, "RAG API");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.docs, "/docs");
        Ok(())
    }

    #[tokio::test]
    async fn reports_configured_docs_path() -> anyhow::Result<()> {
        let state = create_test_state(
            MockRetrievalProvider::default(),
            &MockGenerationProvider::default(),
        )
        .with_api_info(ApiInfo::new("/reference"));
        let server = create_test_server_with_state(state)?;

        let info = server.get("/").await.json::<ServiceInfo>();
        assert_eq!(info.docs, "/reference");
        Ok(())
    }
}
