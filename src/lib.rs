//! Sliding-window VWAP aggregator
//!
//! Keeps a trailing time window of trades per instrument, rejects price
//! outliers with the interquartile-range rule and reports a volume-weighted
//! average price per instrument.

pub mod core;
pub mod engine;
pub mod feed;
pub mod hot_path;
pub mod infrastructure;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use crate::core::{Instrument, Trade};
pub use engine::{InstrumentVwap, VwapEngine};
pub use infrastructure::config::{Config, ConfigError, EngineConfig, WindowConfig};
pub use infrastructure::TradeWindow;

use std::time::Duration;
use thiserror::Error;

/// Main error type for the aggregator
#[derive(Error, Debug)]
pub enum VwapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Worker for {instrument} failed: {message}")]
    Worker { instrument: Instrument, message: String },

    #[error("Timed out after {0:?} waiting for instrument workers")]
    JoinTimeout(Duration),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VwapError>;
