//! Text generation with a language model.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{Result, TRACING_TARGET_GENERATION};

/// Prompt completion backed by a model-serving host.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates a completion for `prompt` using the model named `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Generation service with observability.
#[derive(Clone)]
pub struct GenerationService {
    provider: Arc<dyn GenerationProvider>,
}

impl fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationService").finish_non_exhaustive()
    }
}

impl GenerationService {
    /// Creates a new generation service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: GenerationProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Generates a completion for `prompt`.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET_GENERATION,
            model = %model,
            prompt_length = prompt.len(),
            "Processing generation request"
        );

        let result = self.provider.generate(model, prompt).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(answer) => {
                tracing::debug!(
                    target: TRACING_TARGET_GENERATION,
                    model = %model,
                    answer_length = answer.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Generation successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_GENERATION,
                    model = %model,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Generation failed"
                );
            }
        }

        result
    }
}
