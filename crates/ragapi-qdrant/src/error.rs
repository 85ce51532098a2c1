//! Error types for ragapi-qdrant.

use thiserror::Error;

/// Error type for the Qdrant backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Qdrant client/connection errors.
    #[error("Qdrant error: {0}")]
    Qdrant(#[from] qdrant_client::QdrantError),

    /// The query text could not be embedded.
    #[error("Failed to embed query text: {0}")]
    Embedding(#[source] ragapi_core::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<Error> for ragapi_core::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::Config(_) => ragapi_core::ErrorKind::Configuration,
            Error::Qdrant(_) | Error::Embedding(_) => ragapi_core::ErrorKind::Unavailable,
        };

        ragapi_core::Error::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}

/// Result type alias for ragapi-qdrant operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
