//! Mock providers for testing.
//!
//! These mocks return configurable canned data and can be switched into a
//! failing mode to exercise error paths. They are only available with the
//! `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! ragapi-core = { version = "...", features = ["test-utils"] }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    EmbeddingProvider, EmbeddingService, Error, GenerationProvider, GenerationService, Result,
    RetrievalProvider, RetrievalService,
};

/// Default collection name reported by [`MockRetrievalProvider`].
pub const MOCK_COLLECTION: &str = "docs";

/// Default answer returned by [`MockGenerationProvider`].
pub const MOCK_ANSWER: &str = "This is a mock answer.";

/// Retrieval provider serving a fixed list of documents.
#[derive(Debug, Clone)]
pub struct MockRetrievalProvider {
    collection: String,
    documents: Vec<String>,
    count: Option<u64>,
    failing: bool,
}

impl Default for MockRetrievalProvider {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl MockRetrievalProvider {
    /// Creates a provider returning `documents` in order.
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection: MOCK_COLLECTION.to_owned(),
            documents: documents.into_iter().map(Into::into).collect(),
            count: None,
            failing: false,
        }
    }

    /// Overrides the reported collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Overrides the reported document count (defaults to the document list length).
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Makes every call fail with an unavailable error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Wraps this provider into a [`RetrievalService`].
    pub fn into_service(self) -> RetrievalService {
        RetrievalService::from_provider(self)
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(Error::unavailable().with_message("mock vector store is unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RetrievalProvider for MockRetrievalProvider {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn query(&self, _text: &str, limit: usize) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.documents.iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        self.check()?;
        Ok(self.count.unwrap_or(self.documents.len() as u64))
    }
}

/// A prompt received by [`MockGenerationProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPrompt {
    /// Model identifier passed by the caller.
    pub model: String,
    /// Full prompt text.
    pub prompt: String,
}

/// Generation provider returning a fixed answer and recording every prompt.
#[derive(Debug, Clone)]
pub struct MockGenerationProvider {
    answer: String,
    failing: bool,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

impl Default for MockGenerationProvider {
    fn default() -> Self {
        Self::new(MOCK_ANSWER)
    }
}

impl MockGenerationProvider {
    /// Creates a provider that always answers with `answer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            failing: false,
            prompts: Arc::default(),
        }
    }

    /// Makes every call fail with a model error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Returns all prompts received so far, shared with every clone.
    pub async fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().await.clone()
    }

    /// Wraps a clone of this provider into a [`GenerationService`].
    ///
    /// The clone shares the prompt log, so `self` can still be inspected.
    pub fn to_service(&self) -> GenerationService {
        GenerationService::from_provider(self.clone())
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(RecordedPrompt {
            model: model.to_owned(),
            prompt: prompt.to_owned(),
        });

        if self.failing {
            return Err(Error::model().with_message("mock model failed to respond"));
        }

        Ok(self.answer.clone())
    }
}

/// Embedding provider returning a constant vector of the configured size.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
    failing: bool,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(8)
    }
}

impl MockEmbeddingProvider {
    /// Creates a provider producing vectors with `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            failing: false,
        }
    }

    /// Makes every call fail with an unavailable error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Wraps this provider into an [`EmbeddingService`].
    pub fn into_service(self) -> EmbeddingService {
        EmbeddingService::from_provider(self)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.failing {
            return Err(Error::unavailable().with_message("mock embedder is unreachable"));
        }

        let seed = text.len() as f32;
        Ok(vec![seed; self.dimensions])
    }
}
