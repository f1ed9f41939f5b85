//! Configuration management for the VIP loan client.
//!
//! Loads settings from environment variables and config files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Upper bound Binance accepts for `recvWindow`.
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Binance API credentials and connection settings
    #[serde(default)]
    pub binance: BinanceConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct BinanceConfig {
    /// API key for authentication
    #[serde(default)]
    pub api_key: String,
    /// Secret key for signing requests
    #[serde(default)]
    pub secret_key: String,
    /// REST host, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Validity window for signed requests in milliseconds (0 = not sent)
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    crate::exchange::SPOT_BASE_URL.to_string()
}

fn default_recv_window() -> u64 {
    5_000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from `.env`, an optional `config.*` file, and
    /// `VIPLOAN__*` environment variables (e.g. `VIPLOAN__BINANCE__API_KEY`).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("VIPLOAN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.binance.api_key.is_empty() && !self.binance.secret_key.is_empty(),
            "api_key and secret_key must be set"
        );

        anyhow::ensure!(
            self.binance.recv_window <= MAX_RECV_WINDOW_MS,
            "recv_window must not exceed {} ms",
            MAX_RECV_WINDOW_MS
        );

        anyhow::ensure!(
            self.binance.timeout_secs > 0,
            "timeout_secs must be greater than 0"
        );

        Ok(())
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            base_url: default_base_url(),
            recv_window: default_recv_window(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_key", &redact(&self.api_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
