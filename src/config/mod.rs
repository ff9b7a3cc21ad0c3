//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Statistics query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Page size requested from the store for player searches
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,

    /// Window for the recently active player listing
    #[serde(default = "default_active_window_minutes")]
    pub active_window_minutes: u32,
}

fn default_search_page_size() -> u32 {
    20
}

fn default_active_window_minutes() -> u32 {
    10
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            search_page_size: default_search_page_size(),
            active_window_minutes: default_active_window_minutes(),
        }
    }
}

impl StatsConfig {
    pub fn active_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.active_window_minutes))
    }
}

/// HTTP listener settings for `serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Exact origin allowed by CORS; any origin when unset
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors_origin: None,
        }
    }
}

/// Top-level settings, read from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the JSONL exports
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            stats: StatsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.validate().map(|()| config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.search_page_size == 0 {
            return Err(ConfigError::ValidationError(
                "Search page size must be greater than 0".to_string(),
            ));
        }

        if self.stats.active_window_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "Active window must be greater than 0 minutes".to_string(),
            ));
        }

        if self.server.listen.port() == 0 {
            return Err(ConfigError::ValidationError(format!(
                "Listen address {} needs an explicit port",
                self.server.listen
            )));
        }

        Ok(())
    }
}
