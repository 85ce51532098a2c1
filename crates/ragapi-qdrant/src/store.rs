//! Qdrant-backed [`RetrievalProvider`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::vectors_config::Config as VectorsConfig;
use qdrant_client::qdrant::with_payload_selector::SelectorOptions;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, SearchPointsBuilder,
    VectorParamsBuilder,
};
use ragapi_core::{EmbeddingService, RetrievalProvider};
use tokio::sync::OnceCell;

use crate::payload::payload_text;
use crate::{Error, QdrantConfig, Result, TRACING_TARGET};

/// Document store searching a single Qdrant collection.
///
/// Query text is embedded through the given [`EmbeddingService`] before the
/// nearest-neighbour search. The collection is created on first use when it
/// is missing. Cloning is cheap.
#[derive(Clone)]
pub struct QdrantStore {
    inner: Arc<QdrantStoreInner>,
}

struct QdrantStoreInner {
    client: Qdrant,
    embedder: EmbeddingService,
    config: QdrantConfig,
    /// Set once the collection is known to exist.
    collection_ready: OnceCell<()>,
}

impl fmt::Debug for QdrantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QdrantStore")
            .field("url", &self.inner.config.qdrant_url)
            .field("collection", &self.inner.config.collection_name)
            .finish_non_exhaustive()
    }
}

impl QdrantStore {
    /// Creates a new store.
    ///
    /// The gRPC channel is established lazily on the first request.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the client cannot
    /// be built.
    pub fn new(config: QdrantConfig, embedder: EmbeddingService) -> Result<Self> {
        config.validate()?;

        let mut builder =
            Qdrant::from_url(&config.qdrant_url).api_key(config.qdrant_api_key.clone());
        builder.set_timeout(config.timeout());
        builder.set_connect_timeout(config.timeout());

        let client = builder.build().map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                url = %config.qdrant_url,
                "Failed to create Qdrant client"
            );
            Error::from(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            url = %config.qdrant_url,
            collection = %config.collection_name,
            "Qdrant client created"
        );

        Ok(Self {
            inner: Arc::new(QdrantStoreInner {
                client,
                embedder,
                config,
                collection_ready: OnceCell::new(),
            }),
        })
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &QdrantConfig {
        &self.inner.config
    }

    /// Ensures the collection exists, creating it with cosine distance if necessary.
    ///
    /// Succeeds at most once. After a failure the next call, or the next
    /// search or count, checks again, so a Qdrant that starts after the API
    /// still gets its collection.
    pub async fn ensure_collection(&self) -> Result<()> {
        self.inner
            .collection_ready
            .get_or_try_init(|| async { self.create_collection_if_missing().await.map(drop) })
            .await
            .copied()
    }

    /// Returns `true` once the collection is known to exist.
    pub fn is_collection_ready(&self) -> bool {
        self.inner.collection_ready.initialized()
    }

    async fn create_collection_if_missing(&self) -> Result<bool> {
        let config = &self.inner.config;
        let name = config.collection_name.as_str();

        if self.inner.client.collection_exists(name).await? {
            tracing::debug!(
                target: TRACING_TARGET,
                collection = %name,
                "Collection already exists"
            );
            return Ok(false);
        }

        let vectors_config = VectorsConfig::Params(
            VectorParamsBuilder::new(config.qdrant_vector_size, Distance::Cosine).build(),
        );

        self.inner
            .client
            .create_collection(CreateCollectionBuilder::new(name).vectors_config(vectors_config))
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            collection = %name,
            dimensions = config.qdrant_vector_size,
            "Created Qdrant collection"
        );

        Ok(true)
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let config = &self.inner.config;
        let vector = self
            .inner
            .embedder
            .embed(text)
            .await
            .map_err(Error::Embedding)?;

        self.ensure_collection().await?;
        let search = SearchPointsBuilder::new(&config.collection_name, vector, limit as u64)
            .with_payload(SelectorOptions::Enable(true));

        let response = self.inner.client.search_points(search).await?;
        let points = response.result.len();

        let documents: Vec<String> = response
            .result
            .into_iter()
            .filter_map(|point| payload_text(&point.payload, &config.qdrant_payload_key))
            .collect();

        if documents.len() < points {
            tracing::warn!(
                target: TRACING_TARGET,
                collection = %config.collection_name,
                payload_key = %config.qdrant_payload_key,
                skipped = points - documents.len(),
                "Some points carry no text under the payload key"
            );
        }

        Ok(documents)
    }

    async fn count_points(&self) -> Result<u64> {
        self.ensure_collection().await?;
        let request = CountPointsBuilder::new(&self.inner.config.collection_name).exact(true);
        let response = self.inner.client.count(request).await?;
        Ok(response.result.map(|r| r.count).unwrap_or_default())
    }
}

#[async_trait]
impl RetrievalProvider for QdrantStore {
    fn collection_name(&self) -> &str {
        &self.inner.config.collection_name
    }

    async fn query(&self, text: &str, limit: usize) -> ragapi_core::Result<Vec<String>> {
        Ok(self.search(text, limit).await?)
    }

    async fn count(&self) -> ragapi_core::Result<u64> {
        Ok(self.count_points().await?)
    }
}

#[cfg(test)]
mod tests {
    use ragapi_core::ErrorKind;
    use ragapi_core::mock::MockEmbeddingProvider;

    use super::*;

    #[tokio::test]
    async fn new_rejects_invalid_config() {
        let config = QdrantConfig::new("qdrant:6334");
        let result = QdrantStore::new(config, MockEmbeddingProvider::default().into_service());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn reports_configured_collection() -> anyhow::Result<()> {
        let config = QdrantConfig::default().with_collection("articles");
        let store = QdrantStore::new(config, MockEmbeddingProvider::default().into_service())?;
        assert_eq!(store.collection_name(), "articles");
        Ok(())
    }

    #[tokio::test]
    async fn zero_limit_skips_search() -> anyhow::Result<()> {
        let store = QdrantStore::new(
            QdrantConfig::default(),
            MockEmbeddingProvider::default().failing().into_service(),
        )?;
        assert!(store.query("anything", 0).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_store_is_checked_again() -> anyhow::Result<()> {
        let config = QdrantConfig::new("http://127.0.0.1:9");
        let store = QdrantStore::new(config, MockEmbeddingProvider::default().into_service())?;

        for _ in 0..2 {
            let error = store.count().await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Unavailable);
            assert!(!store.is_collection_ready());
        }
        assert!(store.ensure_collection().await.is_err());
        assert!(!store.is_collection_ready());
        Ok(())
    }

    #[tokio::test]
    async fn embedding_failure_is_unavailable() -> anyhow::Result<()> {
        let store = QdrantStore::new(
            QdrantConfig::default(),
            MockEmbeddingProvider::default().failing().into_service(),
        )?;

        let error = store.query("anything", 3).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unavailable);
        Ok(())
    }
}
