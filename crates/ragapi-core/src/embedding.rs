//! Text embeddings used to query the vector store.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{Result, TRACING_TARGET_EMBEDDING};

/// Converts text into a dense vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the embedding of `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Embedding service with observability.
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingService").finish_non_exhaustive()
    }
}

impl EmbeddingService {
    /// Creates a new embedding service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: EmbeddingProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Embeds `text`.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let started_at = Timestamp::now();
        let result = self.provider.embed(text).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(vector) => {
                tracing::debug!(
                    target: TRACING_TARGET_EMBEDDING,
                    text_length = text.len(),
                    dimensions = vector.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Embedding successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_EMBEDDING,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Embedding failed"
                );
            }
        }

        result
    }
}
