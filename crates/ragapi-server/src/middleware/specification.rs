//! Serves the generated API description and a Scalar reference page.
//!
//! The OpenAPI document is generated from the [`ApiRouter`] routes and served as
//! JSON, next to a Scalar API reference page that renders it.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use ragapi_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new().with_open_api(OpenApiConfig::default());
//! ```
//!
//! [`ApiRouter`]: aide::axum::ApiRouter

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi, Tag};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Title of the generated API documentation.
pub const API_TITLE: &str = "RAG API";

/// Description of the generated API documentation.
pub const API_DESCRIPTION: &str = "Retrieval-Augmented Generation API with Qdrant and Ollama";

/// Paths of the API description and its reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path of the OpenAPI JSON document.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "openapi-json-path",
            env = "OPENAPI_JSON_PATH",
            default_value = "/openapi.json"
        )
    )]
    pub open_api_json: String,

    /// Path of the Scalar page, also reported by `GET /`.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "openapi-docs-path",
            env = "OPENAPI_DOCS_PATH",
            default_value = "/docs"
        )
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/openapi.json".to_owned(),
            scalar_ui: "/docs".to_owned(),
        }
    }
}

/// Finishes an [`ApiRouter`] into a plain router that also serves its docs.
///
/// [`ApiRouter`]: aide::axum::ApiRouter
pub trait RouterOpenApiExt<S> {
    /// Uses the "RAG API" title and the crate version.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Uses caller-provided document info.
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: API_TITLE.to_owned(),
            description: Some(API_DESCRIPTION.to_owned()),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            tags: vec![
                Tag {
                    name: "Service".to_owned(),
                    description: Some("Service identity and liveness".to_owned()),
                    ..Tag::default()
                },
                Tag {
                    name: "Retrieval".to_owned(),
                    description: Some("Question answering over the document collection".to_owned()),
                    ..Tag::default()
                },
            ],
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json).with_title(API_TITLE);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}
