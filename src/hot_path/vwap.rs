//! Volume-weighted average price
//!
//! `sum(price * volume) / sum(volume)` accumulated in input order.
//! Empty input or zero total volume yields 0.

use crate::core::Trade;

/// Stateless VWAP calculator
pub struct VwapCalculator;

impl VwapCalculator {
    /// Calculate VWAP over `trades`
    #[inline]
    pub fn calculate(trades: &[Trade]) -> f64 {
        let mut total_volume = 0.0;
        let mut weighted_sum = 0.0;

        for trade in trades {
            total_volume += trade.volume;
            weighted_sum += trade.notional();
        }

        if total_volume == 0.0 {
            return 0.0;
        }

        weighted_sum / total_volume
    }
}
