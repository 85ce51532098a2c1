//! Failures that stop the listener.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server stopped: {0}")]
    Serve(#[source] io::Error),

    #[cfg_attr(not(feature = "tls"), allow(dead_code))]
    #[error("cannot load TLS certificate or key: {0}")]
    Tls(#[source] io::Error),
}

impl ServerError {
    /// Returns an operator hint for failures with a well-known cause.
    pub fn hint(&self) -> Option<&'static str> {
        let Self::Bind { source, .. } = self else {
            return matches!(self, Self::Tls(_))
                .then_some("check TLS_CERT_PATH and TLS_KEY_PATH point at readable PEM files");
        };

        match source.kind() {
            io::ErrorKind::AddrInUse => {
                Some("another process holds the port, stop it or set PORT")
            }
            io::ErrorKind::AddrNotAvailable => Some("HOST is not an address of this machine"),
            io::ErrorKind::PermissionDenied => Some("ports below 1024 need elevated privileges"),
            _ => None,
        }
    }
}
