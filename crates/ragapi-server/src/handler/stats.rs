//! Collection statistics handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use ragapi_core::RetrievalService;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{CollectionStats, ErrorResponse};
use crate::service::ServiceState;

/// Tracing target for collection statistics.
const TRACING_TARGET: &str = "ragapi_server::handler::stats";

/// Counts the documents in the configured collection.
#[tracing::instrument(skip_all, fields(collection = %retrieval.collection_name()))]
async fn collection_stats(
    State(retrieval): State<RetrievalService>,
) -> Result<Json<CollectionStats>> {
    tracing::debug!(target: TRACING_TARGET, "Counting collection documents");

    let document_count = retrieval.count().await?;

    tracing::debug!(
        target: TRACING_TARGET,
        document_count,
        "Collection documents counted"
    );

    Ok(Json(CollectionStats {
        collection_name: retrieval.collection_name().to_owned(),
        document_count,
    }))
}

fn collection_stats_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get collection statistics")
        .description("Returns the name of the document collection and how many documents it holds.")
        .response::<200, Json<CollectionStats>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the collection statistics route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/stats", get_with(collection_stats, collection_stats_docs))
        .with_path_items(|item| item.tag("Retrieval"))
}
