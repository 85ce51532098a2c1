#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use axum::Router;
use ragapi_server::handler::routes;
use ragapi_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
};
use ragapi_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_service_state};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "ragapi_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "ragapi_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "ragapi_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    cli.init_tracing();

    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli).await?;
    let router = create_router(state, &cli.middleware);

    if let Err(error) = server::serve(router, cli.server).await {
        if let Some(hint) = error.hint() {
            tracing::info!(target: TRACING_TARGET_SERVER_SHUTDOWN, hint, "How to fix");
        }
        return Err(error.into());
    }

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost): catches panics and enforces timeouts
/// 2. Observability: request ids and tracing spans
/// 3. Security: CORS, security headers, compression
/// 4. Routes (innermost): handlers and API documentation
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let api_routes: Router = routes()
        .with_state(state)
        .with_open_api(middleware.openapi.clone());

    api_routes
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
