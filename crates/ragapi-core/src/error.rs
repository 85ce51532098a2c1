//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors raised by providers and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied an input the operation cannot accept.
    InvalidInput,
    /// Vector store (or the embedding backend behind it) could not be reached.
    Unavailable,
    /// Language model failed to produce an answer.
    Model,
    /// Provider was configured with invalid settings.
    Configuration,
    /// Unexpected internal failure.
    Internal,
}

/// A structured error type for provider operations.
#[derive(Debug, Error)]
#[error(
    "{}{}",
    .kind.as_ref(),
    .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new upstream unavailable error.
    pub fn unavailable() -> Self {
        Self::new(ErrorKind::Unavailable)
    }

    /// Creates a new model error.
    pub fn model() -> Self {
        Self::new(ErrorKind::Model)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new internal error.
    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the message if present.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let error = Error::unavailable().with_message("connection refused");
        assert_eq!(error.to_string(), "unavailable: connection refused");
        assert_eq!(Error::model().to_string(), "model");
    }

    #[test]
    fn kind_str_is_snake_case() {
        assert_eq!(Error::invalid_input().kind_str(), "invalid_input");
        assert_eq!(Error::configuration().kind_str(), "configuration");
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("socket closed");
        let error = Error::internal().with_source(io);
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert!(error.source().is_some());
    }
}
