//! Sliding-window VWAP aggregator
//!
//! # Architecture
//! - **core**: Value types (Trade, Instrument, Clock)
//! - **hot_path**: Pure computations (quantile, outlier bounds, VWAP, routing)
//! - **infrastructure**: Trade windows, config, logging, metrics
//! - **engine**: Per-instrument fan-out and result join
//!
//! Runs a single batch (from `feed.trades_path`, or the demo batch) through the
//! engine and logs one VWAP per tracked instrument.

use anyhow::Context;
use time::OffsetDateTime;
use vwap_window::feed::{demo_trades, load_trades};
use vwap_window::infrastructure::logging::init_logging;
use vwap_window::{Config, VwapEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config or use defaults
    let config = Config::load().context("loading configuration")?;

    let _guards = init_logging(&config.logging).context("initializing logging")?;

    let trades = match &config.feed.trades_path {
        Some(path) => load_trades(path)
            .with_context(|| format!("loading trades from {}", path.display()))?,
        None => demo_trades(OffsetDateTime::now_utc()),
    };
    tracing::info!(count = trades.len(), "Loaded trade batch");

    let engine = VwapEngine::new(&config);
    let results = engine.process(&trades).await?;

    for result in &results {
        tracing::info!(
            instrument = %result.instrument,
            vwap = result.vwap,
            valid_trades = result.valid_trades,
            rejected_outliers = result.rejected_outliers,
            "volume weighted average price"
        );
    }

    let metrics = engine.metrics().snapshot();
    tracing::info!(
        received = metrics.trades_received,
        accepted = metrics.trades_accepted,
        stale = metrics.trades_stale,
        unrouted = metrics.trades_unrouted,
        outliers = metrics.outliers_rejected,
        "Batch complete"
    );

    Ok(())
}
