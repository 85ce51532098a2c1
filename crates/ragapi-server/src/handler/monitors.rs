//! Liveness handler.
//!
//! The check only confirms the process is serving requests. Downstream
//! dependencies are not probed, use `/stats` to exercise the vector store.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;

use crate::extract::Json;
use crate::handler::response::HealthStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "ragapi_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status() -> Json<HealthStatus> {
    tracing::trace!(target: TRACING_TARGET, "Health status requested");
    Json(HealthStatus::healthy())
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get health status")
        .description("Returns `healthy` while the server is accepting requests.")
        .response::<200, Json<HealthStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Service"))
}
