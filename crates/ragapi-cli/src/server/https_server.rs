//! HTTPS listener backed by rustls.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Serves `app` over HTTPS until SIGINT or SIGTERM.
///
/// Certificate and key are read before binding, so bad paths fail start-up.
pub async fn serve_https(
    app: Router,
    server_config: ServerConfig,
    cert_path: &Path,
    key_path: &Path,
) -> ServerResult<()> {
    let tls = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(ServerError::Tls)?;

    let addr = server_config.server_addr();
    let grace = server_config.shutdown_timeout();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        %addr,
        cert = %cert_path.display(),
        "Listening for HTTPS"
    );

    serve_with_shutdown(&server_config, move || async move {
        let handle = Handle::new();
        let on_signal = handle.clone();
        tokio::spawn(async move {
            shutdown_signal(grace).await;
            on_signal.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
    })
    .await
    .map_err(ServerError::Serve)
}
