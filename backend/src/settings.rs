//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `VULNETIX_*` environment variables over an
//! optional configuration file. Every field is optional; accessors supply
//! the defaults.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration values for the HTTP server and its database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VULNETIX")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the server runs on fixtures.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Milliseconds to wait for a pooled connection.
    pub checkout_timeout_ms: Option<u64>,
    /// Milliseconds any single transaction may run.
    pub statement_timeout_ms: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Build the pool configuration when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE));
        if let Some(ms) = self.checkout_timeout_ms {
            config = config.with_checkout_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.statement_timeout_ms {
            config = config.with_statement_timeout(Duration::from_millis(ms));
        }
        Some(config)
    }
}
