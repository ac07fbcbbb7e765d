//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

use anyhow::Context;

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the server to (e.g. `127.0.0.1:3001`).
    pub listen_addr: SocketAddr,

    /// Allow-list of application names the poll queue accepts.
    pub queue_applications: Vec<String>,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`], or if `QUEUE_APPLICATIONS` parses to an empty
    /// list.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3001".to_string())
            .parse()
            .context("invalid LISTEN_ADDR")?;

        let raw = std::env::var("QUEUE_APPLICATIONS")
            .unwrap_or_else(|_| "photoshop,premiere".to_string());
        let queue_applications = parse_application_list(&raw);
        anyhow::ensure!(
            !queue_applications.is_empty(),
            "QUEUE_APPLICATIONS must name at least one application"
        );

        Ok(Self {
            listen_addr,
            queue_applications,
        })
    }
}

/// Splits a comma-separated application list, trimming whitespace and
/// dropping empty entries.
fn parse_application_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
