//! Handler error carrying a status kind and the client-facing detail.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Error returned by handlers and extractors.
///
/// The [`ErrorKind`] picks the status and default body. `message` overrides
/// the detail shown to clients, `context` only reaches the logs.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error {
    kind: ErrorKind,
    message: Option<Cow<'static, str>>,
    resource: Option<&'static str>,
    context: Option<String>,
}

impl Error {
    /// Creates an error answering with the default body of `kind`.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }

    /// Replaces the detail sent to the client.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Names the part of the service that failed, e.g. `vector_store`.
    pub fn with_resource(mut self, resource: &'static str) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Attaches diagnostics for the logs.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn detail(&self) -> Cow<'static, str> {
        match &self.message {
            Some(message) => message.clone(),
            None => self.kind.response().detail,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("status", &self.kind.status_code().as_u16())
            .field("message", &self.message)
            .field("resource", &self.resource)
            .field("context", &self.context)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.kind.status_code(), self.detail())?;
        if let Some(resource) = self.resource {
            write!(f, " [{resource}]")?;
        }
        if let Some(context) = &self.context {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let mut body = self.kind.response().with_detail(self.detail());
        if let Some(resource) = self.resource {
            body = body.with_resource(resource);
        }
        if let Some(context) = self.context {
            body = body.with_context(context);
        }
        body.into_response()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl aide::OperationOutput for Error {
    type Inner = ErrorResponse<'static>;
}

/// Handler result, failing with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Statuses the API answers with on failure.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, the query string was rejected.
    BadRequest,
    /// 404, no such route.
    NotFound,
    /// 500
    InternalServerError,
    /// 502, the language model failed.
    BadGateway,
    /// 503, the vector store could not be queried.
    ServiceUnavailable,
    /// 504, the request outlived its deadline.
    GatewayTimeout,
}

impl ErrorKind {
    /// Shorthand for [`Error::new`] followed by [`Error::with_message`].
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_message(message)
    }

    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the body sent when no message overrides it.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::BadGateway => ErrorResponse::BAD_GATEWAY,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout => ErrorResponse::GATEWAY_TIMEOUT,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (ErrorKind::BadRequest, StatusCode::BAD_REQUEST),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::BadGateway, StatusCode::BAD_GATEWAY),
            (ErrorKind::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ErrorKind::GatewayTimeout, StatusCode::GATEWAY_TIMEOUT),
        ];
        for (kind, status) in cases {
            assert_eq!(Error::from(kind).into_response().status(), status);
        }
    }

    #[test]
    fn message_overrides_detail() {
        let error = ErrorKind::BadRequest
            .with_message("Query cannot be empty")
            .with_resource("request")
            .with_context("q was blank");

        assert_eq!(error.message(), Some("Query cannot be empty"));
        assert_eq!(error.resource(), Some("request"));
        assert_eq!(error.context(), Some("q was blank"));
    }

    #[test]
    fn display_includes_resource_and_context() {
        let error = ErrorKind::ServiceUnavailable
            .with_message("Vector store is unavailable")
            .with_resource("vector_store")
            .with_context("connection refused");

        assert_eq!(
            error.to_string(),
            "service_unavailable (503 Service Unavailable): Vector store is unavailable \
             [vector_store]: connection refused"
        );
    }

    #[test]
    fn display_falls_back_to_default_detail() {
        let display = Error::new(ErrorKind::NotFound).to_string();
        assert_eq!(display, "not_found (404 Not Found): Resource not found.");
    }
}
