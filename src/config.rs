//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. Every
//! setting has a default, so the dashboard runs without a config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chain::ContractAddress;
use crate::history::UndatedPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
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
    8501
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
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// RPC node and contract configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// Block explorer base URL, used for the contract link
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Evaluate all four reads at one block height
    #[serde(default = "default_pin_block")]
    pub pin_block: bool,
}

fn default_rpc_url() -> String {
    "https://polygon-rpc.com".to_string()
}

fn default_contract_address() -> String {
    "0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC".to_string()
}

fn default_explorer_url() -> String {
    "https://polygonscan.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pin_block() -> bool {
    true
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            explorer_url: default_explorer_url(),
            request_timeout_secs: default_request_timeout(),
            pin_block: default_pin_block(),
        }
    }
}

impl ChainConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn contract(&self) -> Result<ContractAddress, ConfigError> {
        ContractAddress::parse(&self.contract_address)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// NAV log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub undated_rows: UndatedPolicy,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("nav_log.csv")
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            undated_rows: UndatedPolicy::default(),
        }
    }
}

/// Page layout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Records plotted in the NAV chart
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,

    /// Records listed in the daily returns table
    #[serde(default = "default_table_window")]
    pub table_window: usize,
}

fn default_title() -> String {
    "FNQT Token NAV Dashboard".to_string()
}

fn default_chart_window() -> usize {
    90
}

fn default_table_window() -> usize {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            chart_window: default_chart_window(),
            table_window: default_table_window(),
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("nav-dashboard").join("config.toml")),
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

    /// Check settings that would otherwise only fail at render time
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.contract()?;

        if self.chain.rpc_url.trim().is_empty() {
            return Err(ConfigError::Invalid("chain.rpc_url is empty".to_string()));
        }
        if self.dashboard.chart_window == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.chart_window must be at least 1".to_string(),
            ));
        }
        if self.dashboard.table_window == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.table_window must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("NAV_DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("NAV_DASHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(url) = std::env::var("NAV_DASHBOARD_RPC_URL") {
            self.chain.rpc_url = url;
        }
        if let Ok(address) = std::env::var("NAV_DASHBOARD_CONTRACT") {
            self.chain.contract_address = address;
        }

        if let Ok(path) = std::env::var("NAV_DASHBOARD_HISTORY_PATH") {
            self.history.path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("NAV_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NAV_DASHBOARD_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# NAV Dashboard Configuration
#
# Environment variables override these settings:
# - NAV_DASHBOARD_HOST
# - NAV_DASHBOARD_PORT
# - NAV_DASHBOARD_RPC_URL
# - NAV_DASHBOARD_CONTRACT
# - NAV_DASHBOARD_HISTORY_PATH
# - NAV_DASHBOARD_LOG_LEVEL
# - NAV_DASHBOARD_LOG_FORMAT

[server]
host = "0.0.0.0"
port = 8501

[chain]
# JSON-RPC endpoint (no API key)
rpc_url = "https://polygon-rpc.com"

# Token contract exposing getNAV(), totalSupply(), name(), symbol()
contract_address = "0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC"

# Block explorer used for the contract link
explorer_url = "https://polygonscan.com"

# Per-request timeout in seconds
request_timeout_secs = 30

# Read all four values at the same block height
pin_block = true

[history]
# CSV with columns: date, nav, return
path = "nav_log.csv"

# Rows with unparseable dates: "exclude", "keep" (sorted last) or "reject"
undated_rows = "exclude"

[dashboard]
title = "FNQT Token NAV Dashboard"

# Records plotted in the NAV chart
chart_window = 90

# Records listed in the daily returns table
table_window = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
