//! Infrastructure
//!
//! This module contains the stateful and cold-path pieces:
//! - Per-instrument trade windows
//! - Configuration management
//! - Logging and metrics

pub mod config;
pub mod logging;
pub mod metrics;
pub mod trade_window;

pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use trade_window::{FilterOutcome, IngestReport, TradeWindow};
