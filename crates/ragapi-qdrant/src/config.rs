//! Qdrant store configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for the Qdrant-backed document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct QdrantConfig {
    /// Qdrant gRPC endpoint (e.g., "http://localhost:6334").
    #[cfg_attr(
        feature = "config",
        arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334")
    )]
    #[serde(default = "default_url")]
    pub qdrant_url: String,

    /// API key for authentication.
    #[cfg_attr(feature = "config", arg(long, env = "QDRANT_API_KEY"))]
    #[serde(default, skip_serializing)]
    pub qdrant_api_key: Option<String>,

    /// Name of the document collection.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "COLLECTION_NAME", default_value = "docs")
    )]
    #[serde(default = "default_collection")]
    pub collection_name: String,

    /// Dimension of the stored vectors, used when creating the collection.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "QDRANT_VECTOR_SIZE", default_value = "768")
    )]
    #[serde(default = "default_vector_size")]
    pub qdrant_vector_size: u64,

    /// Payload field holding the document text.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "QDRANT_PAYLOAD_KEY", default_value = "document")
    )]
    #[serde(default = "default_payload_key")]
    pub qdrant_payload_key: String,

    /// Request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "QDRANT_TIMEOUT", default_value = "10")
    )]
    #[serde(default = "default_timeout_secs")]
    pub qdrant_timeout: u64,
}

fn default_url() -> String {
    "http://localhost:6334".to_string()
}

fn default_collection() -> String {
    "docs".to_string()
}

fn default_vector_size() -> u64 {
    768
}

fn default_payload_key() -> String {
    "document".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            qdrant_url: default_url(),
            qdrant_api_key: None,
            collection_name: default_collection(),
            qdrant_vector_size: default_vector_size(),
            qdrant_payload_key: default_payload_key(),
            qdrant_timeout: default_timeout_secs(),
        }
    }
}

impl QdrantConfig {
    /// Create a new configuration pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.qdrant_timeout)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.qdrant_url.starts_with("http://") && !self.qdrant_url.starts_with("https://") {
            return Err(Error::invalid_config(format!(
                "Qdrant URL must start with http:// or https://, got '{}'",
                self.qdrant_url
            )));
        }

        if self.collection_name.trim().is_empty() {
            return Err(Error::invalid_config("collection name cannot be empty"));
        }

        if self.qdrant_payload_key.trim().is_empty() {
            return Err(Error::invalid_config("payload key cannot be empty"));
        }

        if self.qdrant_vector_size == 0 {
            return Err(Error::invalid_config(
                "vector size must be greater than zero",
            ));
        }

        if self.qdrant_timeout == 0 {
            return Err(Error::invalid_config(
                "Qdrant timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.qdrant_api_key = Some(api_key.into());
        self
    }

    /// Set the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection_name = collection.into();
        self
    }

    /// Set the vector size used when creating the collection.
    #[must_use]
    pub fn with_vector_size(mut self, size: u64) -> Self {
        self.qdrant_vector_size = size;
        self
    }

    /// Set the payload field holding document text.
    #[must_use]
    pub fn with_payload_key(mut self, key: impl Into<String>) -> Self {
        self.qdrant_payload_key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = QdrantConfig::default();
        assert_eq!(config.collection_name, "docs");
        assert_eq!(config.qdrant_payload_key, "document");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(QdrantConfig::new("localhost:6334").validate().is_err());
        assert!(QdrantConfig::default().with_collection(" ").validate().is_err());
        assert!(QdrantConfig::default().with_payload_key("").validate().is_err());
        assert!(QdrantConfig::default().with_vector_size(0).validate().is_err());
    }

    #[test]
    fn builder_sets_fields() {
        let config = QdrantConfig::new("https://qdrant.internal:6334")
            .with_api_key("secret")
            .with_collection("articles")
            .with_vector_size(384);

        assert_eq!(config.qdrant_api_key.as_deref(), Some("secret"));
        assert_eq!(config.collection_name, "articles");
        assert_eq!(config.qdrant_vector_size, 384);
        assert!(config.validate().is_ok());
    }
}
