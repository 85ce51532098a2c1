//! Ollama client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Configuration for the Ollama client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct OllamaConfig {
    /// Ollama server base URL (e.g., "http://localhost:11434").
    #[cfg_attr(
        feature = "config",
        arg(
            long = "ollama-host",
            env = "OLLAMA_HOST",
            default_value = "http://localhost:11434"
        )
    )]
    #[serde(default = "default_host")]
    pub ollama_host: String,

    /// Model used to embed query text (e.g., "nomic-embed-text").
    #[cfg_attr(
        feature = "config",
        arg(
            long = "ollama-embedding-model",
            env = "OLLAMA_EMBEDDING_MODEL",
            default_value = "nomic-embed-text"
        )
    )]
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Maximum time in seconds to wait for a single Ollama call.
    #[cfg_attr(
        feature = "config",
        arg(long = "ollama-timeout", env = "OLLAMA_TIMEOUT", default_value = "120")
    )]
    #[serde(default = "default_timeout_secs")]
    pub ollama_timeout: u64,
}

fn default_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            ollama_host: default_host(),
            embedding_model: default_embedding_model(),
            ollama_timeout: default_timeout_secs(),
        }
    }
}

impl OllamaConfig {
    /// Create a new configuration pointing at `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            ollama_host: host.into(),
            ..Self::default()
        }
    }

    /// Parses and validates the server URL.
    ///
    /// Only `http` and `https` URLs with a host are accepted.
    pub fn url(&self) -> Result<Url> {
        let url = Url::parse(&self.ollama_host).map_err(|e| {
            Error::invalid_config(format!("invalid Ollama host '{}': {e}", self.ollama_host))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "Ollama host must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_config(format!(
                "Ollama host '{}' has no host name",
                self.ollama_host
            )));
        }

        Ok(url)
    }

    /// Returns the per-call timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.ollama_timeout)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.url()?;

        if self.embedding_model.trim().is_empty() {
            return Err(Error::invalid_config("embedding model cannot be empty"));
        }

        if self.ollama_timeout == 0 {
            return Err(Error::invalid_config(
                "Ollama timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.ollama_host = host.into();
        self
    }

    /// Set the embedding model.
    #[must_use]
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the per-call timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.ollama_timeout = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::default();
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.embedding_model, "nomic-embed-text");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_parsing() -> Result<()> {
        let url = OllamaConfig::new("http://host.docker.internal:11434").url()?;
        assert_eq!(url.host_str(), Some("host.docker.internal"));
        assert_eq!(url.port(), Some(11434));
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_hosts() {
        assert!(OllamaConfig::new("localhost:11434").validate().is_err());
        assert!(OllamaConfig::new("ftp://localhost").validate().is_err());
        assert!(OllamaConfig::new("not a url").validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = OllamaConfig::default()
            .with_host("http://remote-server:9999")
            .with_embedding_model("mxbai-embed-large")
            .with_timeout_secs(0);

        assert_eq!(config.ollama_host, "http://remote-server:9999");
        assert_eq!(config.embedding_model, "mxbai-embed-large");
        assert!(config.validate().is_err());
    }
}
