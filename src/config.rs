//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("greenledger").to_string_lossy().to_string())
        .unwrap_or_else(|| "./greenledger_data".to_string())
}

fn default_ledger_file() -> String {
    "guest_ledger.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ledger_file: default_ledger_file(),
        }
    }
}

impl StorageConfig {
    /// Full path to the guest ledger blob
    pub fn ledger_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.ledger_file)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8091
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hosted emissions backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_url")]
    pub url: String,

    #[serde(default = "default_remote_timeout")]
    pub request_timeout_ms: u64,
}

fn default_remote_url() -> String {
    "https://api.greenledger.example".to_string()
}

fn default_remote_timeout() -> u64 {
    60_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            request_timeout_ms: default_remote_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("greenledger").join("config.toml")),
            Some(PathBuf::from("/etc/greenledger/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Storage overrides
        if let Ok(data_dir) = std::env::var("GREENLEDGER_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // API overrides
        if let Ok(host) = std::env::var("GREENLEDGER_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("GREENLEDGER_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Remote backend overrides
        if let Ok(url) = std::env::var("GREENLEDGER_REMOTE_URL") {
            self.remote.url = url;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("GREENLEDGER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GREENLEDGER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# GreenLedger Configuration
#
# Environment variables override these settings:
# - GREENLEDGER_DATA_DIR
# - GREENLEDGER_API_HOST
# - GREENLEDGER_API_PORT
# - GREENLEDGER_REMOTE_URL
# - GREENLEDGER_LOG_LEVEL
# - GREENLEDGER_LOG_FORMAT

[storage]
# Directory for local data files
data_dir = "~/.local/share/greenledger"

# File holding the guest ledger blob, relative to data_dir
ledger_file = "guest_ledger.json"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8091

# Allowed CORS origins (the SPA dev server by default)
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

# Request timeout in seconds
request_timeout_secs = 30

[remote]
# Hosted emissions backend URL (used by the authenticated dispatch path)
url = "https://api.greenledger.example"

# Request timeout in milliseconds (generous: the backend runs AI workloads)
request_timeout_ms = 60000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/greenledger/greenledger.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_template_parses() {
        let template = generate_default_config();
        let config: Config = toml::from_str(&template).unwrap();

        assert_eq!(config.api.port, 8091);
        assert_eq!(config.storage.ledger_file, "guest_ledger.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[api]\nport = 9000\n").unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.remote.request_timeout_ms, 60_000);
    }

    #[test]
    fn test_ledger_path_joins_dir_and_file() {
        let storage = StorageConfig {
            data_dir: "/tmp/gl".to_string(),
            ledger_file: "guest_ledger.json".to_string(),
        };
        assert_eq!(
            storage.ledger_path(),
            PathBuf::from("/tmp/gl/guest_ledger.json")
        );
    }
}
