//! Configuration management for the VWAP aggregator
//!
//! Loads configuration from config.toml at startup.
//! All values are configurable to avoid hardcoded constants.

use crate::hot_path::OutlierParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Aggregator configuration
///
/// Loaded from config.toml at startup. Every section and field falls back to
/// its default when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Trade window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Trade source settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Trade window configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Rolling window duration in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// IQR multiplier for outlier bounds
    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: f64,

    /// Lower quantile fraction (Q1)
    #[serde(default = "default_lower_quantile")]
    pub lower_quantile: f64,

    /// Upper quantile fraction (Q3)
    #[serde(default = "default_upper_quantile")]
    pub upper_quantile: f64,
}

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Instruments to track, one window each
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,

    /// Upper bound on waiting for instrument workers. Unset waits forever.
    #[serde(default)]
    pub join_timeout_ms: Option<u64>,
}

/// Trade source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    /// JSON file of trades. Unset uses the built-in demo batch.
    #[serde(default)]
    pub trades_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Write log files in addition to the console
    #[serde(default = "default_file_logging")]
    pub file: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            iqr_multiplier: default_iqr_multiplier(),
            lower_quantile: default_lower_quantile(),
            upper_quantile: default_upper_quantile(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            join_timeout_ms: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            file: default_file_logging(),
        }
    }
}

fn default_window_seconds() -> u64 {
    120 // 2 minutes
}

fn default_iqr_multiplier() -> f64 {
    1.5
}

fn default_lower_quantile() -> f64 {
    0.25
}

fn default_upper_quantile() -> f64 {
    0.75
}

fn default_instruments() -> Vec<String> {
    vec!["BTC/USD".to_string(), "ETH/USD".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_file_logging() -> bool {
    true
}

impl WindowConfig {
    /// Window duration
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    /// Outlier rejection parameters
    #[inline]
    pub fn outlier_params(&self) -> OutlierParams {
        OutlierParams {
            lower_quantile: self.lower_quantile,
            upper_quantile: self.upper_quantile,
            iqr_multiplier: self.iqr_multiplier,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "window.window_seconds must be positive".into(),
            ));
        }
        if !(self.iqr_multiplier >= 0.0 && self.iqr_multiplier.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "window.iqr_multiplier must be a finite non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        for (name, value) in [
            ("lower_quantile", self.lower_quantile),
            ("upper_quantile", self.upper_quantile),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "window.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.lower_quantile > self.upper_quantile {
            return Err(ConfigError::Invalid(format!(
                "window.lower_quantile ({}) exceeds window.upper_quantile ({})",
                self.lower_quantile, self.upper_quantile
            )));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Join timeout, if configured
    #[inline]
    pub fn join_timeout(&self) -> Option<Duration> {
        self.join_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid(
                "engine.instruments must name at least one instrument".into(),
            ));
        }
        if let Some(name) = self.instruments.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "engine.instruments contains a blank name: {:?}",
                name
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// The path comes from `CONFIG_PATH`, falling back to `config.toml`.
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File not found - use defaults
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.engine.validate()
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
