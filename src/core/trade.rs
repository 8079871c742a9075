//! Trade data
//!
//! A trade is an immutable observation: when, which instrument, at what price,
//! for how much volume. Prices and volumes are not validated; negative values
//! flow through the arithmetic unchanged.

use super::Instrument;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Individual executed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time (UTC, RFC 3339 on the wire)
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Trading pair
    pub instrument: Instrument,
    /// Trade price
    pub price: f64,
    /// Trade volume
    pub volume: f64,
}

impl Trade {
    /// Create new trade
    #[inline]
    pub fn new(
        timestamp: OffsetDateTime,
        instrument: Instrument,
        price: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            instrument,
            price,
            volume,
        }
    }

    /// Notional value (price * volume)
    #[inline(always)]
    pub fn notional(&self) -> f64 {
        self.price * self.volume
    }

    /// True if the trade is strictly newer than `cutoff`
    #[inline(always)]
    pub fn is_after(&self, cutoff: OffsetDateTime) -> bool {
        self.timestamp > cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_trade_creation() {
        let ts = datetime!(2024-05-01 12:00:00 UTC);
        let trade = Trade::new(ts, Instrument::new("BTC/USD"), 50_000.0, 1.5);
        assert_eq!(trade.instrument.as_str(), "BTC/USD");
        assert_eq!(trade.notional(), 75_000.0);
    }

    #[test]
    fn test_is_after_is_strict() {
        let ts = datetime!(2024-05-01 12:00:00 UTC);
        let trade = Trade::new(ts, Instrument::new("BTC/USD"), 1.0, 1.0);
        assert!(trade.is_after(ts - time::Duration::seconds(1)));
        assert!(!trade.is_after(ts));
    }

    #[test]
    fn test_json_wire_format() {
        let ts = datetime!(2024-05-01 12:00:00 UTC);
        let trade = Trade::new(ts, Instrument::new("ETH/USD"), 3000.0, 10.0);
        let json = serde_json::to_string(&trade).unwrap();
        assert!(json.contains("\"2024-05-01T12:00:00Z\""));

        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
    }

    #[test]
    fn test_negative_values_accepted() {
        let ts = datetime!(2024-05-01 12:00:00 UTC);
        let trade = Trade::new(ts, Instrument::new("ETH/USD"), -10.0, 2.0);
        assert_eq!(trade.notional(), -20.0);
    }
}
