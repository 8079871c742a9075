//! Wall-clock source
//!
//! Windows read "now" through this trait so eviction can be driven by a
//! controlled clock in tests and benches.

use time::OffsetDateTime;

pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time (UTC)
    fn now(&self) -> OffsetDateTime;
}

/// System UTC clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
