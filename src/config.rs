//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Number of customers returned by a top-K query without `k`
    pub default_top_k: usize,

    /// Largest `k` a client may ask for
    pub max_top_k: usize,

    /// Event file replayed into the reducer at startup
    pub events_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let default_top_k = env::var("DEFAULT_TOP_K")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DEFAULT_TOP_K"))?;

        let max_top_k = env::var("MAX_TOP_K")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("MAX_TOP_K"))?;

        if default_top_k > max_top_k {
            return Err(ConfigError::InvalidValue("DEFAULT_TOP_K"));
        }

        let events_file = env::var("EVENTS_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            environment,
            default_top_k,
            max_top_k,
            events_file,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            default_top_k: 10,
            max_top_k: 1000,
            events_file: None,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
