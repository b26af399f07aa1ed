//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `PARKWATCH_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;
use crate::scheduler::RefreshIntervals;
use crate::theme::{SystemPreference, Theme};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Occupancy API connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Refresh periods in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_secs: u64,

    #[serde(default = "default_history_interval")]
    pub history_interval_secs: u64,
}

fn default_snapshot_interval() -> u64 {
    60
}

fn default_history_interval() -> u64 {
    300
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            snapshot_interval_secs: default_snapshot_interval(),
            history_interval_secs: default_history_interval(),
        }
    }
}

impl PollingConfig {
    /// Intervals for the scheduler; zero is raised to one second
    pub fn intervals(&self) -> RefreshIntervals {
        RefreshIntervals {
            snapshot: Duration::from_secs(self.snapshot_interval_secs.max(1)),
            history: Duration::from_secs(self.history_interval_secs.max(1)),
        }
    }
}

/// Dashboard HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Theme persistence and the fallback used when nothing is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Stand-in for the OS dark-mode signal
    #[serde(default)]
    pub system: Theme,
}

fn default_state_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("parkwatch").join("theme.json"))
        .unwrap_or_else(|| PathBuf::from("./parkwatch_theme.json"))
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            system: Theme::default(),
        }
    }
}

impl ThemeConfig {
    pub fn system_preference(&self) -> SystemPreference {
        SystemPreference::new(self.system.is_dark())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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
            dirs::config_dir().map(|p| p.join("parkwatch").join("config.toml")),
            Some(PathBuf::from("/etc/parkwatch/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Explicit file if given, else the default search
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `PARKWATCH_*` overrides from a lookup; unparseable numbers are ignored
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PARKWATCH_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }

        if let Some(host) = lookup("PARKWATCH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PARKWATCH_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(secs) = lookup("PARKWATCH_SNAPSHOT_INTERVAL").and_then(|s| s.parse().ok()) {
            self.polling.snapshot_interval_secs = secs;
        }
        if let Some(secs) = lookup("PARKWATCH_HISTORY_INTERVAL").and_then(|s| s.parse().ok()) {
            self.polling.history_interval_secs = secs;
        }

        if let Some(path) = lookup("PARKWATCH_THEME_FILE") {
            self.theme.state_file = PathBuf::from(path);
        }

        if let Some(level) = lookup("PARKWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PARKWATCH_LOG_FORMAT") {
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
    r#"# Parkwatch Configuration
#
# Environment variables override these settings:
# - PARKWATCH_UPSTREAM_URL
# - PARKWATCH_HOST
# - PARKWATCH_PORT
# - PARKWATCH_SNAPSHOT_INTERVAL
# - PARKWATCH_HISTORY_INTERVAL
# - PARKWATCH_THEME_FILE
# - PARKWATCH_LOG_LEVEL
# - PARKWATCH_LOG_FORMAT

[upstream]
# Occupancy API serving /api/parking-data and the history endpoints
base_url = "http://localhost:5000"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 10

[polling]
# Current snapshot refresh (seconds)
snapshot_interval_secs = 60

# Aggregate history refresh (seconds)
history_interval_secs = 300

[server]
host = "0.0.0.0"
port = 8080

[theme]
# Where the chosen theme is remembered (default: <data dir>/parkwatch/theme.json)
# state_file = "/var/lib/parkwatch/theme.json"

# Theme used until one is chosen: "light" or "dark"
system = "light"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty, json
format = "pretty"
"#
    .to_string()
}
