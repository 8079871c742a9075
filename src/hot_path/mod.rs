//! Hot path operations - pure, allocation-light computations
//!
//! This module contains the per-query math:
//! - Quantile estimation
//! - IQR outlier bounds
//! - VWAP aggregation
//! - Instrument routing

pub mod outlier;
pub mod quantile;
pub mod routing;
pub mod vwap;

pub use outlier::{OutlierBounds, OutlierParams};
pub use quantile::{quantile, try_quantile};
pub use routing::{partition_by_instrument, Partition, PairRouter, RoutedBatch};
pub use vwap::VwapCalculator;
