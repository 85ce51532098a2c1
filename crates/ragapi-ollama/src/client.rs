//! Ollama client wrapper.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use ollama_rs::Ollama;

use crate::{Error, OllamaConfig, Result, TRACING_TARGET_CLIENT};

/// Ollama client shared by the generation and embedding providers.
///
/// Cloning is cheap: the underlying `ollama-rs` client and configuration are
/// reference counted.
#[derive(Clone)]
pub struct OllamaClient {
    inner: Arc<OllamaClientInner>,
}

struct OllamaClientInner {
    ollama: Ollama,
    config: OllamaConfig,
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("host", &self.inner.config.ollama_host)
            .field("embedding_model", &self.inner.config.embedding_model)
            .finish_non_exhaustive()
    }
}

impl OllamaClient {
    /// Creates a new client from configuration.
    ///
    /// No request is sent; use [`OllamaClient::health_check`] to verify the
    /// server is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        config.validate()?;

        let url = config.url()?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::invalid_config("Ollama host has no host name"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| Error::invalid_config("Ollama host has no port"))?;

        let ollama = Ollama::new(format!("{}://{}", url.scheme(), host), port);

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            host = %host,
            port,
            embedding_model = %config.embedding_model,
            "Ollama client created"
        );

        Ok(Self {
            inner: Arc::new(OllamaClientInner { ollama, config }),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.inner.config
    }

    /// Returns the model used for embeddings.
    pub fn embedding_model(&self) -> &str {
        &self.inner.config.embedding_model
    }

    /// Returns the underlying `ollama-rs` client.
    pub(crate) fn ollama(&self) -> &Ollama {
        &self.inner.ollama
    }

    /// Runs `future` under the configured per-call timeout.
    pub(crate) async fn with_timeout<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, ollama_rs::error::OllamaError>>,
    {
        let timeout = self.inner.config.timeout();
        match tokio::time::timeout(timeout, future).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::Timeout(timeout)),
        }
    }

    /// Verifies the server is reachable by listing local models.
    pub async fn health_check(&self) -> Result<()> {
        let models = self.with_timeout(self.ollama().list_local_models()).await?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            models = models.len(),
            "Ollama health check successful"
        );

        Ok(())
    }
}
