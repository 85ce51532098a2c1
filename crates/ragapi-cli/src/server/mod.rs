//! HTTP/HTTPS server startup with lifecycle management.
//!
//! The protocol is chosen at compile time: with the `tls` feature the server
//! speaks HTTPS when certificate paths are configured, plain HTTP otherwise.

mod error;
mod http_server;
#[cfg(feature = "tls")]
mod https_server;
mod lifecycle;
mod shutdown;

use axum::Router;

pub use self::error::{ServerError, ServerResult};
use self::http_server::serve_http;
#[cfg(feature = "tls")]
use self::https_server::serve_https;
use self::shutdown::shutdown_signal;
use crate::config::ServerConfig;

/// Starts the server, selecting HTTP or HTTPS from the configuration.
///
/// # Errors
///
/// Returns an error if:
/// - TLS certificates cannot be loaded (HTTPS mode)
/// - the address cannot be bound
/// - the server fails while running
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    #[cfg(feature = "tls")]
    if let Some((cert_path, key_path)) = config.tls_paths() {
        let (cert_path, key_path) = (cert_path.to_path_buf(), key_path.to_path_buf());
        return serve_https(app, config, &cert_path, &key_path).await;
    }

    serve_http(app, config).await
}
