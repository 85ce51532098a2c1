//! Document retrieval from a vector store.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{Result, TRACING_TARGET_RETRIEVAL};

/// Nearest-neighbour document lookup over a single collection.
///
/// Implementations own the embedding of the query text and the similarity
/// metric; callers only see ranked document texts.
#[async_trait]
pub trait RetrievalProvider: Send + Sync {
    /// Returns the name of the collection this provider searches.
    fn collection_name(&self) -> &str;

    /// Returns up to `limit` document texts ranked by similarity to `text`.
    async fn query(&self, text: &str, limit: usize) -> Result<Vec<String>>;

    /// Returns the number of documents stored in the collection.
    async fn count(&self) -> Result<u64>;
}

/// Retrieval service with observability.
///
/// Wraps any [`RetrievalProvider`] and logs every call with its elapsed time.
#[derive(Clone)]
pub struct RetrievalService {
    provider: Arc<dyn RetrievalProvider>,
}

impl fmt::Debug for RetrievalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalService")
            .field("collection", &self.provider.collection_name())
            .finish_non_exhaustive()
    }
}

impl RetrievalService {
    /// Creates a new retrieval service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: RetrievalProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Returns the name of the underlying collection.
    pub fn collection_name(&self) -> &str {
        self.provider.collection_name()
    }

    /// Retrieves the top `limit` documents for `text`.
    pub async fn query(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET_RETRIEVAL,
            collection = %self.collection_name(),
            query_length = text.len(),
            limit,
            "Processing retrieval request"
        );

        let result = self.provider.query(text, limit).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(documents) => {
                tracing::debug!(
                    target: TRACING_TARGET_RETRIEVAL,
                    collection = %self.collection_name(),
                    documents = documents.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Retrieval successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_RETRIEVAL,
                    collection = %self.collection_name(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Retrieval failed"
                );
            }
        }

        result
    }

    /// Counts the documents in the underlying collection.
    pub async fn count(&self) -> Result<u64> {
        let started_at = Timestamp::now();
        let result = self.provider.count().await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(count) => {
                tracing::debug!(
                    target: TRACING_TARGET_RETRIEVAL,
                    collection = %self.collection_name(),
                    count,
                    elapsed_ms = elapsed.as_millis(),
                    "Collection count successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_RETRIEVAL,
                    collection = %self.collection_name(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Collection count failed"
                );
            }
        }

        result
    }
}
