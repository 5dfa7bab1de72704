//! Server configuration parsed from environment variables.
//!
//! A `.env` file is loaded by `main` before this runs, so values there count
//! as environment too.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use client::net::api::Timeouts;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_RELAY_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RELAY_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend base URL without a trailing `/`.
    pub backend_url: String,
    pub relay_timeouts: Timeouts,
    /// CORS origins; a lone `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_URL`: default `http://localhost:8000`
    /// - `RELAY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RELAY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `ALLOWED_ORIGINS`: comma-separated, default the local dev origins
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let backend_url = lookup("BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let relay_timeouts = Timeouts {
            request_secs: parse_or(&lookup, "RELAY_REQUEST_TIMEOUT_SECS", DEFAULT_RELAY_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "RELAY_CONNECT_TIMEOUT_SECS", DEFAULT_RELAY_CONNECT_TIMEOUT_SECS),
        };

        let allowed_origins =
            parse_origins(lookup("ALLOWED_ORIGINS").as_deref().unwrap_or(DEFAULT_ALLOWED_ORIGINS));

        Ok(Self { port, backend_url, relay_timeouts, allowed_origins })
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_owned())
        .collect()
}
