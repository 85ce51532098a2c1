//! Backend provider wiring.

use anyhow::Context;
use ragapi_core::{EmbeddingService, GenerationService, RetrievalService};
use ragapi_ollama::OllamaClient;
use ragapi_qdrant::{QdrantConfig, QdrantStore};
use ragapi_server::service::{ApiInfo, ServiceState};

use super::Cli;
use crate::TRACING_TARGET_SERVER_STARTUP;

/// Connects the model and vector store backends and builds the service state.
///
/// Unreachable backends are logged but do not abort start-up: the affected
/// endpoints answer with 502/503 until the backend comes back.
///
/// # Errors
///
/// Returns an error if a client cannot be constructed from its configuration.
pub async fn create_service_state(cli: &Cli) -> anyhow::Result<ServiceState> {
    let ollama = OllamaClient::new(cli.ollama.clone()).context("failed to create Ollama client")?;

    if let Err(error) = ollama.health_check().await {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %error,
            host = %cli.ollama.ollama_host,
            "Ollama is not reachable, answers will fail until it is"
        );
    }

    let generation = GenerationService::from_provider(ollama.clone());
    let embedding = EmbeddingService::from_provider(ollama);
    let retrieval = create_retrieval_service(&cli.qdrant, embedding).await?;

    let state = ServiceState::new(cli.service.clone(), retrieval, generation)
        .with_api_info(ApiInfo::from(&cli.middleware.openapi));

    Ok(state)
}

/// Creates the Qdrant-backed retrieval service and tries to prepare the collection.
async fn create_retrieval_service(
    config: &QdrantConfig,
    embedder: EmbeddingService,
) -> anyhow::Result<RetrievalService> {
    let store =
        QdrantStore::new(config.clone(), embedder).context("failed to create Qdrant store")?;

    match store.ensure_collection().await {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                collection = %config.collection_name,
                "Document collection ready"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_STARTUP,
                error = %error,
                qdrant_url = %config.qdrant_url,
                "Qdrant is not reachable, the collection is checked again on first use"
            );
        }
    }

    Ok(RetrievalService::from_provider(store))
}
