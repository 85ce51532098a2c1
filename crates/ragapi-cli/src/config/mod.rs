//! Command-line and environment configuration of the RAG API.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # listener address, drain period, TLS
//! ├── middleware: MiddlewareConfig # CORS origins, docs paths, request deadline
//! ├── service: ServiceConfig       # model answering questions
//! ├── ollama: OllamaConfig         # Ollama host, embedding model, call timeout
//! └── qdrant: QdrantConfig         # Qdrant URL, collection, payload key
//! ```
//!
//! Every flag has an environment variable twin, e.g. `--model-name` and
//! `MODEL_NAME`. A `.env` file is honoured with the `dotenv` feature.
//!
//! # Example
//!
//! ```bash
//! ragapi --qdrant-url "http://qdrant:6334" --port 8080
//!
//! # Or via environment variables
//! QDRANT_URL="http://qdrant:6334" PORT=8080 ragapi
//! ```

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, ValueEnum};
pub use middleware::MiddlewareConfig;
pub use provider::create_service_state;
use ragapi_ollama::OllamaConfig;
use ragapi_qdrant::QdrantConfig;
use ragapi_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "ragapi")]
#[command(about = "Retrieval-augmented question answering over a Qdrant collection")]
#[command(version)]
pub struct Cli {
    /// Listener settings.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// CORS, docs paths and the request deadline.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Answering configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Ollama configuration for generation and embeddings.
    #[clap(flatten)]
    pub ollama: OllamaConfig,

    /// Qdrant configuration for document retrieval.
    #[clap(flatten)]
    pub qdrant: QdrantConfig,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parses arguments after loading `.env` when the `dotenv` feature is on.
    ///
    /// The .env file is read first so clap's `env` fallbacks can see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("ragapi: ignoring unreadable .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Installs the global subscriber. `RUST_LOG` filters, `info` otherwise.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        match self.log_format {
            LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
            LogFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
                .init(),
        }
    }

    /// Logs the version, then platform details at debug level.
    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting RAG API server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid listener settings")?;
        self.service
            .validate()
            .map_err(|message| anyhow!(message))
            .context("invalid service configuration")?;
        self.ollama
            .validate()
            .context("invalid Ollama configuration")?;
        self.qdrant
            .validate()
            .context("invalid Qdrant configuration")?;

        let request_timeout = self.middleware.recovery.request_timeout;
        let model_timeout = self.ollama.ollama_timeout;
        if request_timeout <= model_timeout {
            bail!(
                "request timeout ({request_timeout}s) must exceed the Ollama timeout \
                 ({model_timeout}s), otherwise slow generation answers 504 instead of 502"
            );
        }
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            model = %self.service.model_name,
            ollama_host = %self.ollama.ollama_host,
            embedding_model = %self.ollama.embedding_model,
            ollama_timeout_secs = self.ollama.ollama_timeout,
            "Model configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            qdrant_url = %self.qdrant.qdrant_url,
            collection = %self.qdrant.collection_name,
            vector_size = self.qdrant.qdrant_vector_size,
            api_key_set = self.qdrant.qdrant_api_key.is_some(),
            "Vector store configuration"
        );
    }

    /// Cargo features this binary was built with.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
