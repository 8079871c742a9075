//! Metrics collection for the aggregator
//!
//! Lock-free counters using atomic operations.
//! Updated by instrument workers, read as snapshots for reporting.

use crate::infrastructure::trade_window::IngestReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

/// Aggregator metrics collector
///
/// Thread-safe counters shared between instrument workers.
pub struct MetricsCollector {
    /// Batches processed by the engine
    batches: AtomicU64,
    /// Trades handed to the engine
    trades_received: AtomicU64,
    /// Trades dropped for untracked instruments
    trades_unrouted: AtomicU64,
    /// Trades appended to a window
    trades_accepted: AtomicU64,
    /// Trades already stale on arrival
    trades_stale: AtomicU64,
    /// Trades evicted from a window
    trades_evicted: AtomicU64,
    /// Trades rejected as price outliers
    outliers_rejected: AtomicU64,
    /// Window queries served
    queries: AtomicU64,
    /// Last batch timestamp (Unix millis)
    last_batch_time: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Metrics snapshot for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub batches: u64,
    pub trades_received: u64,
    pub trades_unrouted: u64,
    pub trades_accepted: u64,
    pub trades_stale: u64,
    pub trades_evicted: u64,
    pub outliers_rejected: u64,
    pub queries: u64,
    pub last_batch_time: u64,
    pub trade_rate: f64, // trades per second
    pub uptime_seconds: u64,
}

impl MetricsCollector {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            batches: AtomicU64::new(0),
            trades_received: AtomicU64::new(0),
            trades_unrouted: AtomicU64::new(0),
            trades_accepted: AtomicU64::new(0),
            trades_stale: AtomicU64::new(0),
            trades_evicted: AtomicU64::new(0),
            outliers_rejected: AtomicU64::new(0),
            queries: AtomicU64::new(0),
            last_batch_time: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming batch
    #[inline]
    pub fn record_batch(&self, trades: usize, unrouted: usize) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.trades_received.fetch_add(trades as u64, Ordering::Relaxed);
        self.trades_unrouted.fetch_add(unrouted as u64, Ordering::Relaxed);
        self.update_last_batch_time();
    }

    /// Record the outcome of one window ingest
    #[inline]
    pub fn record_ingest(&self, report: &IngestReport) {
        self.trades_accepted
            .fetch_add(report.accepted as u64, Ordering::Relaxed);
        self.trades_stale
            .fetch_add(report.dropped_stale as u64, Ordering::Relaxed);
        self.trades_evicted
            .fetch_add(report.evicted as u64, Ordering::Relaxed);
    }

    /// Record one window query
    #[inline]
    pub fn record_query(&self, rejected: usize) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.outliers_rejected
            .fetch_add(rejected as u64, Ordering::Relaxed);
    }

    #[inline]
    fn update_last_batch_time(&self) {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        self.last_batch_time.store(now, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let received = self.trades_received.load(Ordering::Relaxed);
        let uptime = self.start_time.elapsed().as_secs();
        let rate = if uptime > 0 {
            received as f64 / uptime as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            batches: self.batches.load(Ordering::Relaxed),
            trades_received: received,
            trades_unrouted: self.trades_unrouted.load(Ordering::Relaxed),
            trades_accepted: self.trades_accepted.load(Ordering::Relaxed),
            trades_stale: self.trades_stale.load(Ordering::Relaxed),
            trades_evicted: self.trades_evicted.load(Ordering::Relaxed),
            outliers_rejected: self.outliers_rejected.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            last_batch_time: self.last_batch_time.load(Ordering::Relaxed),
            trade_rate: rate,
            uptime_seconds: uptime,
        }
    }

    /// Reset all counters (keeps start time)
    pub fn reset(&self) {
        for counter in [
            &self.batches,
            &self.trades_received,
            &self.trades_unrouted,
            &self.trades_accepted,
            &self.trades_stale,
            &self.trades_evicted,
            &self.outliers_rejected,
            &self.queries,
            &self.last_batch_time,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
