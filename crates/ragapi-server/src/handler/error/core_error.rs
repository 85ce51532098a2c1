//! Conversion of backend errors into HTTP errors.

use ragapi_core::ErrorKind as CoreErrorKind;

use crate::handler::{Error, ErrorKind};

impl From<ragapi_core::Error> for Error {
    fn from(error: ragapi_core::Error) -> Self {
        let (kind, message, resource) = match error.kind() {
            CoreErrorKind::InvalidInput => (
                ErrorKind::BadRequest,
                error.message().unwrap_or("Invalid request data."),
                "request",
            ),
            CoreErrorKind::Unavailable => (
                ErrorKind::ServiceUnavailable,
                "Vector store is unavailable",
                "vector_store",
            ),
            CoreErrorKind::Model => (
                ErrorKind::BadGateway,
                "Language model failed to generate an answer",
                "model",
            ),
            CoreErrorKind::Configuration | CoreErrorKind::Internal => (
                ErrorKind::InternalServerError,
                "Internal server error.",
                "service",
            ),
        };

        kind.with_message(message.to_owned())
            .with_resource(resource)
            .with_context(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn unavailable_maps_to_503() {
        let error: Error = ragapi_core::Error::unavailable()
            .with_message("connection refused")
            .into();

        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(error.kind().status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.resource(), Some("vector_store"));
        assert_eq!(error.context(), Some("unavailable: connection refused"));
    }

    #[test]
    fn model_maps_to_502() {
        let error: Error = ragapi_core::Error::model().into();
        assert_eq!(error.kind(), ErrorKind::BadGateway);
        assert_eq!(error.resource(), Some("model"));
    }

    #[test]
    fn invalid_input_keeps_message() {
        let error: Error = ragapi_core::Error::invalid_input()
            .with_message("text is blank")
            .into();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("text is blank"));
    }

    #[test]
    fn configuration_maps_to_500() {
        let error: Error = ragapi_core::Error::configuration().into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}
