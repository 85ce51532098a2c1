//! Error types for ragapi-ollama.

use std::time::Duration;

use ollama_rs::error::OllamaError;
use thiserror::Error;

/// Error type for the Ollama backend.
#[derive(Error, Debug)]
pub enum Error {
    /// Ollama API errors from ollama-rs.
    #[error("Ollama error: {0}")]
    Ollama(#[from] OllamaError),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server did not answer within the configured timeout.
    #[error("Ollama request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered without an embedding vector.
    #[error("Ollama returned no embedding for model '{0}'")]
    EmptyEmbedding(String),
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
            Error::Ollama(_) | Error::Timeout(_) | Error::EmptyEmbedding(_) => {
                ragapi_core::ErrorKind::Model
            }
        };

        ragapi_core::Error::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}

/// Result type alias for ragapi-ollama operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use ragapi_core::ErrorKind;

    use super::*;

    #[test]
    fn config_errors_map_to_configuration() {
        let error: ragapi_core::Error = Error::invalid_config("bad url").into();
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(error.message(), Some("Configuration error: bad url"));
    }

    #[test]
    fn timeouts_map_to_model_errors() {
        let error: ragapi_core::Error = Error::Timeout(Duration::from_secs(5)).into();
        assert_eq!(error.kind(), ErrorKind::Model);
    }
}
