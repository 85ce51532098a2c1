//! Provider trait implementations for [`OllamaClient`].

use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::embeddings::request::GenerateEmbeddingsRequest;
use ragapi_core::{EmbeddingProvider, GenerationProvider};

use crate::{Error, OllamaClient, TRACING_TARGET_CLIENT};

#[async_trait]
impl GenerationProvider for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> ragapi_core::Result<String> {
        tracing::trace!(
            target: TRACING_TARGET_CLIENT,
            model = %model,
            prompt_length = prompt.len(),
            "Sending generation request"
        );

        let request = GenerationRequest::new(model.to_string(), prompt.to_string());
        let response = self.with_timeout(self.ollama().generate(request)).await?;

        Ok(response.response)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> ragapi_core::Result<Vec<f32>> {
        let model = self.embedding_model();

        tracing::trace!(
            target: TRACING_TARGET_CLIENT,
            model = %model,
            text_length = text.len(),
            "Sending embedding request"
        );

        let request = GenerateEmbeddingsRequest::new(model.to_string(), text.into());
        let response = self
            .with_timeout(self.ollama().generate_embeddings(request))
            .await?;

        // One input yields one embedding.
        let embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyEmbedding(model.to_string()))?;

        Ok(embedding)
    }
}
