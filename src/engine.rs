//! VWAP engine
//!
//! Routes a mixed batch to per-instrument windows, runs one blocking worker per
//! instrument (ingest, then outlier-filtered query, then VWAP) and joins the
//! results. Workers share nothing but the metrics counters.

use crate::core::{Clock, Instrument, SystemClock, Trade};
use crate::hot_path::{PairRouter, VwapCalculator};
use crate::infrastructure::config::Config;
use crate::infrastructure::{MetricsCollector, TradeWindow};
use crate::{Result, VwapError};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

/// Per-instrument result of one processed batch
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentVwap {
    pub instrument: Instrument,
    /// VWAP over the valid trades, 0 when there are none
    pub vwap: f64,
    /// Trades that passed the outlier filter
    pub valid_trades: usize,
    /// Live trades rejected as outliers
    pub rejected_outliers: usize,
}

/// Engine owning one trade window per tracked instrument
pub struct VwapEngine<C: Clock + Clone = SystemClock> {
    router: PairRouter,
    windows: BTreeMap<Instrument, Arc<TradeWindow<C>>>,
    metrics: Arc<MetricsCollector>,
    join_timeout: Option<Duration>,
}

impl VwapEngine<SystemClock> {
    /// Create engine on the system clock
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> VwapEngine<C> {
    /// Create engine whose windows read time from `clock`
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let router = PairRouter::new(config.engine.instruments.iter().map(String::as_str));
        let windows = router
            .instruments()
            .map(|instrument| {
                let window = TradeWindow::with_clock(&config.window, clock.clone());
                (instrument.clone(), Arc::new(window))
            })
            .collect();

        Self {
            router,
            windows,
            metrics: Arc::new(MetricsCollector::new()),
            join_timeout: config.engine.join_timeout(),
        }
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get metrics collector reference
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Window for a tracked instrument
    pub fn window(&self, instrument: &str) -> Option<&Arc<TradeWindow<C>>> {
        self.windows.get(instrument)
    }

    /// Tracked instruments in key order
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.router.instruments()
    }

    /// Process one batch and return one VWAP per tracked instrument.
    ///
    /// Every tracked window gets an ingest call, even with an empty batch, so
    /// stale trades are evicted everywhere. Without a join timeout this waits
    /// for every worker indefinitely.
    /// # Errors
    /// `Worker` if a worker panicked, `JoinTimeout` if the configured timeout
    /// elapsed first. Timed-out workers keep running to completion.
    pub async fn process(&self, trades: &[Trade]) -> Result<Vec<InstrumentVwap>> {
        let batch = self.router.route(trades);
        self.metrics.record_batch(trades.len(), batch.dropped);

        let workers = batch.groups.into_iter().filter_map(|(instrument, group)| {
            let window = Arc::clone(self.windows.get(&instrument)?);
            let metrics = Arc::clone(&self.metrics);
            let name = instrument.clone();

            let handle = tokio::task::spawn_blocking(move || {
                run_worker(&window, instrument, &group, &metrics)
            });

            Some(async move {
                handle.await.map_err(|e| VwapError::Worker {
                    instrument: name,
                    message: e.to_string(),
                })
            })
        });

        let joined = join_all(workers);
        let results = match self.join_timeout {
            Some(limit) => tokio::time::timeout(limit, joined)
                .await
                .map_err(|_| VwapError::JoinTimeout(limit))?,
            None => joined.await,
        };

        let results = results.into_iter().collect::<Result<Vec<_>>>();
        if let Err(e) = &results {
            crate::log_engine!(Level::ERROR, error = %e, "instrument worker failed");
        }
        results
    }
}

/// Ingest, filter and aggregate for one instrument
fn run_worker<C: Clock>(
    window: &TradeWindow<C>,
    instrument: Instrument,
    batch: &[Trade],
    metrics: &MetricsCollector,
) -> InstrumentVwap {
    let report = window.ingest(batch);
    metrics.record_ingest(&report);

    let outcome = window.filter();
    metrics.record_query(outcome.rejected);

    let vwap = VwapCalculator::calculate(&outcome.valid);

    crate::log_engine!(
        Level::DEBUG,
        instrument = %instrument,
        vwap,
        valid = outcome.valid.len(),
        rejected = outcome.rejected,
        "instrument worker finished"
    );

    InstrumentVwap {
        instrument,
        vwap,
        valid_trades: outcome.valid.len(),
        rejected_outliers: outcome.rejected,
    }
}
