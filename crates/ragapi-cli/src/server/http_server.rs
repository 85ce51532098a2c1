//! Plain HTTP listener.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Serves `app` over HTTP until SIGINT or SIGTERM.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let addr = server_config.server_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        %addr,
        "Listening for HTTP"
    );

    let shutdown = shutdown_signal(server_config.shutdown_timeout());
    serve_with_shutdown(&server_config, || async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    })
    .await
    .map_err(ServerError::Serve)
}
