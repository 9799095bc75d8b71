//! Process configuration loaded via OrthoConfig.
//!
//! Values come from the environment under the `REFERRAL_` prefix, with CLI
//! flags taking precedence. Connection secrets stay as plain strings here;
//! the components that hold them long-term wrap them for scrubbing.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Configuration values for the referral backend process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REFERRAL")]
pub struct Settings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<SocketAddr>,
    /// Postgres connection string for the persistence adapters.
    pub database_url: String,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub database_pool_size: u32,
    /// Shared secret used to verify `x-auth-token` credentials.
    pub token_secret: String,
    /// Transactional mail vendor endpoint.
    pub mail_endpoint: String,
    /// API key presented to the mail vendor.
    pub mail_api_key: String,
    /// Seconds to wait on the mail vendor before abandoning a delivery.
    #[ortho_config(default = 10)]
    pub mail_timeout_seconds: u64,
    /// Emit logs as JSON lines instead of the human-readable format.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the mail vendor timeout as a duration.
    #[must_use]
    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_seconds)
    }
}
