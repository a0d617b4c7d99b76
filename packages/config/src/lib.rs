// ABOUTME: Runtime configuration for Tally clients read from the environment
// ABOUTME: Backend URL, HTTP timeouts and tracing subscriber setup

pub mod constants;

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

use constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URL {0}: {1}")]
    InvalidApiUrl(String, url::ParseError),
    #[error("API URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("Invalid timeout for {0}: {1}")]
    InvalidTimeout(&'static str, ParseIntError),
    #[error("Timeout for {0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("Failed to install tracing subscriber: {0}")]
    Logging(String),
}

/// Connection settings for the backend that persists user settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var(TALLY_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let request_timeout = timeout_from_env(
            TALLY_HTTP_REQUEST_TIMEOUT_SECS,
            DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
        )?;
        let connect_timeout = timeout_from_env(
            TALLY_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        )?;

        debug!(
            api_url = %api_url,
            request_timeout_secs = request_timeout.as_secs(),
            connect_timeout_secs = connect_timeout.as_secs(),
            "Resolved backend configuration"
        );

        Ok(ServiceConfig {
            api_url,
            request_timeout,
            connect_timeout,
        })
    }

    /// Build a config pointing at `api_url` with default timeouts
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(ServiceConfig {
            api_url: parse_api_url(api_url)?,
            ..ServiceConfig::default()
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl(raw.to_string(), e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

fn timeout_from_env(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidTimeout(name, e))?,
        Err(_) => default_secs,
    };

    if secs == 0 {
        return Err(ConfigError::ZeroTimeout(name));
    }

    Ok(Duration::from_secs(secs))
}

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Fails if a global subscriber is already set.
pub fn init_logging() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_env(RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
