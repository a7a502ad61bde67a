//! Configuration module for the changelog backend.
//!
//! All configuration is loaded from environment variables (and `.env`) with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared admin key; `None` leaves admin routes open
    pub api_psk: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Seed the store with demo entries at startup
    pub seed_demo: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr { value: String, source: AddrParseError },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBindAddr { value, source } => {
                write!(f, "invalid CHANGELOG_BIND_ADDR `{}`: {}", value, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBindAddr { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("CHANGELOG_API_PSK")
            .ok()
            .filter(|key| !key.is_empty());

        let bind_value =
            env::var("CHANGELOG_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let log_level = env::var("CHANGELOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("CHANGELOG_LOG_JSON")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        let seed_demo = env::var("CHANGELOG_SEED_DEMO")
            .map(|value| parse_flag(&value))
            .unwrap_or(true);

        Ok(Self {
            api_psk,
            bind_addr,
            log_level,
            log_json,
            seed_demo,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
