//! Time-window trade buffer for one instrument
//!
//! Stores trades in insertion order and evicts entries at or before
//! `now - window` on each ingest. Queries reject price outliers with the
//! IQR method and return the surviving trades in their original order.
//!
//! A single mutex guards the buffer: `ingest` and `valid_trades` never
//! interleave on the same window. Separate windows share nothing.

use crate::core::{Clock, SystemClock, Trade};
use crate::hot_path::{OutlierBounds, OutlierParams};
use crate::infrastructure::config::WindowConfig;
use parking_lot::Mutex;
use std::time::Duration;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::Level;

/// Counts from one ingest call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// New trades appended
    pub accepted: usize,
    /// New trades already outside the window on arrival
    pub dropped_stale: usize,
    /// Stored trades removed by the eviction pass
    pub evicted: usize,
    /// Trades stored after the call
    pub retained: usize,
}

/// Result of an outlier-filtered query
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Trades inside the bounds, in insertion order
    pub valid: Vec<Trade>,
    /// Live trades rejected as outliers
    pub rejected: usize,
    /// Bounds used, `None` when the window held no live trades
    pub bounds: Option<OutlierBounds>,
}

/// Trade window for a single instrument
#[derive(Debug)]
pub struct TradeWindow<C: Clock = SystemClock> {
    /// Window duration (e.g., 2 minutes)
    window: Duration,
    /// Outlier rejection parameters
    params: OutlierParams,
    /// Wall-clock source
    clock: C,
    /// Trades in insertion order
    trades: Mutex<Vec<Trade>>,
}

impl TradeWindow<SystemClock> {
    /// Create new window on the system clock
    pub fn new(config: &WindowConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TradeWindow<C> {
    /// Create new window reading time from `clock`
    pub fn with_clock(config: &WindowConfig, clock: C) -> Self {
        Self::with_parts(config.duration(), config.outlier_params(), clock)
    }

    pub fn with_parts(window: Duration, params: OutlierParams, clock: C) -> Self {
        Self {
            window,
            params,
            clock,
            trades: Mutex::new(Vec::with_capacity(1024)),
        }
    }

    /// Oldest timestamp that is already out of the window at `now`
    #[inline(always)]
    fn cutoff(&self, now: OffsetDateTime) -> OffsetDateTime {
        // Windows reaching past the representable range keep everything
        time::Duration::try_from(self.window)
            .ok()
            .and_then(|window| now.checked_sub(window))
            .unwrap_or_else(|| PrimitiveDateTime::MIN.assume_utc())
    }

    /// Add a batch and evict stale trades.
    ///
    /// New trades are admitted against one clock read, then the whole buffer
    /// is swept against a second read. A trade admitted by the first check can
    /// therefore be evicted by the sweep when the call straddles the cutoff.
    pub fn ingest(&self, batch: &[Trade]) -> IngestReport {
        let mut trades = self.trades.lock();

        let cutoff = self.cutoff(self.clock.now());
        let before = trades.len();
        trades.extend(batch.iter().filter(|t| t.is_after(cutoff)).cloned());
        let accepted = trades.len() - before;

        let cutoff = self.cutoff(self.clock.now());
        let before = trades.len();
        trades.retain(|t| t.is_after(cutoff));
        let evicted = before - trades.len();

        let report = IngestReport {
            accepted,
            dropped_stale: batch.len() - accepted,
            evicted,
            retained: trades.len(),
        };

        crate::log_window!(
            Level::DEBUG,
            accepted = report.accepted,
            dropped_stale = report.dropped_stale,
            evicted = report.evicted,
            retained = report.retained,
            "ingested trade batch"
        );

        report
    }

    /// Trades surviving IQR outlier rejection, in insertion order.
    /// Empty when the window holds no trades.
    pub fn valid_trades(&self) -> Vec<Trade> {
        self.filter().valid
    }

    /// Outlier-filtered query with bounds and rejection count.
    ///
    /// Trades that went stale since the last ingest are ignored here without
    /// being removed; only `ingest` mutates the buffer.
    pub fn filter(&self) -> FilterOutcome {
        let trades = self.trades.lock();

        let cutoff = self.cutoff(self.clock.now());
        let live: Vec<&Trade> = trades.iter().filter(|t| t.is_after(cutoff)).collect();

        let mut prices: Vec<f64> = live.iter().map(|t| t.price).collect();
        prices.sort_by(f64::total_cmp);

        let Some(bounds) = OutlierBounds::from_sorted(&prices, &self.params) else {
            return FilterOutcome::default();
        };

        crate::log_window!(
            Level::DEBUG,
            q1 = bounds.q1,
            q3 = bounds.q3,
            iqr = bounds.iqr,
            lower = bounds.lower,
            upper = bounds.upper,
            "computed outlier bounds"
        );

        let valid: Vec<Trade> = live
            .into_iter()
            .filter(|t| bounds.contains(t.price))
            .cloned()
            .collect();
        let rejected = prices.len() - valid.len();

        FilterOutcome {
            valid,
            rejected,
            bounds: Some(bounds),
        }
    }

    /// Copy of the stored trades, stale or not
    pub fn snapshot(&self) -> Vec<Trade> {
        self.trades.lock().clone()
    }

    /// Get current trade count
    pub fn len(&self) -> usize {
        self.trades.lock().len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.trades.lock().is_empty()
    }

    /// Clear all trades
    pub fn clear(&self) {
        self.trades.lock().clear();
    }

    #[inline(always)]
    pub fn duration(&self) -> Duration {
        self.window
    }

    #[inline(always)]
    pub fn params(&self) -> &OutlierParams {
        &self.params
    }
}

impl Default for TradeWindow<SystemClock> {
    fn default() -> Self {
        Self::new(&WindowConfig::default()) // 2 minutes default
    }
}
