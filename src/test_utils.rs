//! Test utilities: controllable clock and trade builders
//!
//! Trades built here are stamped relative to a fixed epoch so that tests using
//! [`ManualClock`] are fully deterministic.

use crate::core::{Clock, Instrument, Trade};
use parking_lot::Mutex;
use std::sync::Arc;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// Reference "now" for tests
pub const EPOCH: OffsetDateTime = datetime!(2024-05-01 12:00:00 UTC);

/// Trade stamped `secs_ago` seconds before [`EPOCH`]
pub fn trade_at(secs_ago: i64, instrument: &str, price: f64, volume: f64) -> Trade {
    Trade::new(
        EPOCH - Duration::seconds(secs_ago),
        Instrument::new(instrument),
        price,
        volume,
    )
}

/// Clock that only moves when told to.
///
/// Each `now()` read returns the current time and then advances it by `step`,
/// which lets tests straddle the two reads inside a single ingest call.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
struct ClockState {
    now: OffsetDateTime,
    step: Duration,
}

impl ManualClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self::stepping(now, Duration::ZERO)
    }

    pub fn stepping(now: OffsetDateTime, step: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState { now, step })),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.inner.lock().now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        let mut state = self.inner.lock();
        let now = state.now;
        let step = state.step;
        state.now += step;
        now
    }
}
