//! Listener address, shutdown grace period and optional TLS material.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
#[cfg(feature = "tls")]
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 30;
const MAX_SHUTDOWN_TIMEOUT: u64 = 300;

/// Where the API listens and how long it drains on shutdown.
///
/// ```bash
/// ragapi --host 0.0.0.0 --port 8080
/// HOST=0.0.0.0 PORT=8080 ragapi
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` inside containers.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listening port, 1024 or above.
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds in-flight questions get to finish after SIGINT or SIGTERM (1-300).
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT)]
    pub shutdown_timeout: u64,

    /// PEM certificate chain. Serving switches to HTTPS when set with the key.
    #[cfg(feature = "tls")]
    #[arg(long, env = "TLS_CERT_PATH", requires = "tls_key_path")]
    pub tls_cert_path: Option<PathBuf>,

    /// PEM private key matching the certificate.
    #[cfg(feature = "tls")]
    #[arg(long, env = "TLS_KEY_PATH", requires = "tls_cert_path")]
    pub tls_key_path: Option<PathBuf>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Rejects privileged ports, shutdown periods outside 1-300 seconds and a
    /// certificate without its key.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.port >= 1024,
            "port {} is privileged, pick one in 1024-65535",
            self.port
        );
        ensure!(
            (1..=MAX_SHUTDOWN_TIMEOUT).contains(&self.shutdown_timeout),
            "shutdown timeout must be 1-{MAX_SHUTDOWN_TIMEOUT} seconds, got {}",
            self.shutdown_timeout
        );

        #[cfg(feature = "tls")]
        if self.tls_cert_path.is_some() != self.tls_key_path.is_some() {
            anyhow::bail!("TLS needs both the certificate and the key path");
        }

        Ok(())
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns `true` for `0.0.0.0` and `::`.
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Returns the certificate and key paths when both are configured.
    #[cfg(feature = "tls")]
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        Some((self.tls_cert_path.as_deref()?, self.tls_key_path.as_deref()?))
    }

    fn is_tls_enabled(&self) -> bool {
        #[cfg(feature = "tls")]
        {
            self.tls_paths().is_some()
        }

        #[cfg(not(feature = "tls"))]
        {
            false
        }
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            shutdown_timeout_secs = self.shutdown_timeout,
            tls = self.is_tls_enabled(),
            "Listener configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            #[cfg(feature = "tls")]
            tls_cert_path: None,
            #[cfg(feature = "tls")]
            tls_key_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_localhost_8000() -> anyhow::Result<()> {
        let config = ServerConfig::default();
        config.validate()?;
        assert_eq!(config.server_addr(), "127.0.0.1:8000".parse::<SocketAddr>()?);
        assert!(!config.binds_to_all_interfaces());
        assert!(!config.is_tls_enabled());
        Ok(())
    }

    #[test]
    fn privileged_port_is_rejected() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shutdown_timeout_bounds() {
        for (secs, valid) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = ServerConfig {
                shutdown_timeout: secs,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate().is_ok(), valid, "{secs}s");
        }
    }

    #[test]
    fn container_host_binds_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
    }

    #[cfg(feature = "tls")]
    #[test]
    fn certificate_without_key_is_rejected() {
        let config = ServerConfig {
            tls_cert_path: Some(PathBuf::from("cert.pem")),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.tls_paths().is_none());
    }
}
