//! Browser-facing protections: CORS, fixed security headers, a body limit
//! and response compression.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::Method;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Largest accepted request body. Questions travel in the query string.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

const ANY_ORIGIN: &str = "*";

/// Headers attached to every response.
///
/// No Content-Security-Policy is sent so the API reference page can pull its
/// scripts from a CDN.
const SECURITY_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, the security headers, the body limit and compression.
    fn with_security(self, cors: &CorsConfig) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig) -> Self {
        let router = SECURITY_HEADERS
            .into_iter()
            .fold(self, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(
                    name,
                    HeaderValue::from_static(value),
                ))
            });

        router
            .layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors.to_layer())
    }
}

/// Cross-origin policy of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Origins allowed to call the API, `*` allows every origin.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "cors-origins",
            env = "CORS_ORIGINS",
            value_delimiter = ',',
            default_value = "*"
        )
    )]
    pub allowed_origins: Vec<String>,

    /// How long browsers may cache a preflight answer, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether cookies and authorization headers may accompany requests.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "cors-allow-credentials",
            env = "CORS_ALLOW_CREDENTIALS",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![ANY_ORIGIN.to_owned()],
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns `true` when no origin restriction is configured.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
            || self.allowed_origins.iter().any(|o| o.trim() == ANY_ORIGIN)
    }

    /// Builds the origin policy.
    ///
    /// A wildcard mirrors the caller's origin, since a literal `*` cannot be
    /// sent together with credentials. Unparsable origins are dropped.
    pub fn allow_origin(&self) -> AllowOrigin {
        if self.allows_any_origin() {
            return AllowOrigin::mirror_request();
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
            .collect();
        AllowOrigin::list(origins)
    }

    fn to_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.allow_origin())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(self.allow_credentials)
            .max_age(Duration::from_secs(self.max_age_seconds))
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::{get, post};
    use axum_test::TestServer;

    use super::*;

    fn server(cors: &CorsConfig) -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/query", post(|body: String| async move { body.len().to_string() }))
            .with_security(cors);
        Ok(TestServer::new(router)?)
    }

    #[test]
    fn wildcard_allows_any_origin() {
        assert!(CorsConfig::default().allows_any_origin());

        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_owned()],
            ..CorsConfig::default()
        };
        assert!(!config.allows_any_origin());
    }

    #[tokio::test]
    async fn sets_security_headers_and_mirrors_origin() -> anyhow::Result<()> {
        let server = server(&CorsConfig::default())?;

        let response = server
            .get("/health")
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("https://ui.example.com"),
            )
            .await;

        assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(
            response.header(header::REFERRER_POLICY),
            "strict-origin-when-cross-origin"
        );
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "https://ui.example.com"
        );
        Ok(())
    }

    #[tokio::test]
    async fn listed_origins_only() -> anyhow::Result<()> {
        let server = server(&CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_owned()],
            ..CorsConfig::default()
        })?;

        let response = server
            .get("/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
            .await;
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() -> anyhow::Result<()> {
        let server = server(&CorsConfig::default())?;

        let response = server
            .post("/query")
            .text("x".repeat(DEFAULT_MAX_BODY_SIZE + 1))
            .await;
        response.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }
}
