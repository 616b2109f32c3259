//! Service configuration.
//!
//! Every setting comes from the environment (optionally seeded from a `.env` file)
//! and falls back to a default suitable for local development.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:8000/api/sessions/";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// Bunyan-style JSON records
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct Config {
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Upstream endpoint listing every session record.
    #[validate(url)]
    pub catalog_url: String,
    #[validate(range(min = 100, max = 60000))]
    pub catalog_timeout_ms: u64,
    #[validate(range(min = 1))]
    pub rate_limit_requests: usize,
    #[validate(range(min = 1))]
    pub rate_limit_window_secs: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout_ms: 5000,
            rate_limit_requests: 120,
            rate_limit_window_secs: 60,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment and validates it.
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            host: try_load("SERVER_HOST", "0.0.0.0")?,
            port: try_load("SERVER_PORT", "3000")?,
            catalog_url: try_load("CATALOG_URL", DEFAULT_CATALOG_URL)?,
            catalog_timeout_ms: try_load("CATALOG_TIMEOUT_MS", "5000")?,
            rate_limit_requests: try_load("RATE_LIMIT_REQUESTS", "120")?,
            rate_limit_window_secs: try_load("RATE_LIMIT_WINDOW_SECS", "60")?,
            log_format: try_load("LOG_FORMAT", "pretty")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid bind address: {}", e)))
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog_timeout_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn try_load<T>(key: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        AppError::Config(format!("invalid {key} value '{raw}': {e}"))
    })
}
