use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// HTTP error response body.
///
/// Only `name`, `detail` and the optional `resource` are sent to clients.
/// The context is kept for logs.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Machine-readable error identifier.
    pub name: Cow<'a, str>,
    /// Human-readable description safe for client display.
    pub detail: Cow<'a, str>,
    /// The resource the error relates to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,

    /// Internal context for debugging, never exposed to clients.
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code, carried out of band.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);

    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const BAD_GATEWAY: Self = Self::new(
        "bad_gateway",
        "Upstream model failed.",
        StatusCode::BAD_GATEWAY,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Service unavailable.",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const GATEWAY_TIMEOUT: Self = Self::new(
        "gateway_timeout",
        "Request timed out.",
        StatusCode::GATEWAY_TIMEOUT,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, detail: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            detail: Cow::Borrowed(detail),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the default detail with a specific one.
    pub fn with_detail(mut self, detail: impl Into<Cow<'a, str>>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Names the failing backend or input, e.g. `vector_store` or `request`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Attaches diagnostics that are logged but never serialized.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        // Backend failures are errors, rejected input is only worth a warning.
        if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                name = %self.name,
                detail = %self.detail,
                resource = ?self.resource,
                context = ?self.context,
                "Request failed"
            );
        } else {
            tracing::warn!(
                status = self.status.as_u16(),
                name = %self.name,
                detail = %self.detail,
                "Request rejected"
            );
        }

        (self.status, Json(self)).into_response()
    }
}
