//! Trade sources
//!
//! Live ingestion is outside this crate. These helpers supply batches for the
//! binary: a JSON file of trades, or a fixed demo batch stamped relative to a
//! caller-supplied "now".

use crate::core::{Instrument, Trade};
use crate::{Result, VwapError};
use std::path::Path;
use time::{Duration, OffsetDateTime};

/// Load trades from a JSON array file
///
/// Each element: `{"timestamp": "<RFC 3339>", "instrument": "BTC/USD",
/// "price": 50000.0, "volume": 1.0}`.
/// # Errors
/// Returns error if the file cannot be read or is not a valid trade array.
pub fn load_trades(path: &Path) -> Result<Vec<Trade>> {
    let contents = std::fs::read_to_string(path)?;
    parse_trades(&contents)
        .map_err(|e| VwapError::Feed(format!("{}: {}", path.display(), e)))
}

/// Parse a JSON array of trades
pub fn parse_trades(json: &str) -> std::result::Result<Vec<Trade>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Demo batch: five BTC/USD and five ETH/USD trades, one minute old
pub fn demo_trades(now: OffsetDateTime) -> Vec<Trade> {
    let ts = now - Duration::minutes(1);
    let btc = Instrument::new(Instrument::BTC_USD);
    let eth = Instrument::new(Instrument::ETH_USD);

    let legs = [
        (&btc, 50_000.0, 1.0),
        (&btc, 51_000.0, 1.5),
        (&btc, 52_000.0, 2.0),
        (&btc, 53_000.0, 2.5),
        (&btc, 54_000.0, 3.0),
        (&eth, 3_000.0, 10.0),
        (&eth, 3_100.0, 15.0),
        (&eth, 3_200.0, 20.0),
        (&eth, 3_300.0, 25.0),
        (&eth, 3_400.0, 30.0),
    ];

    legs.into_iter()
        .map(|(instrument, price, volume)| Trade::new(ts, instrument.clone(), price, volume))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::EPOCH;

    #[test]
    fn test_demo_trades() {
        let trades = demo_trades(EPOCH);
        assert_eq!(trades.len(), 10);
        assert_eq!(trades.iter().filter(|t| t.instrument.as_str() == "BTC/USD").count(), 5);
        assert!(trades.iter().all(|t| t.timestamp == EPOCH - Duration::minutes(1)));
    }

    #[test]
    fn test_parse_trades() {
        let json = r#"[
            {"timestamp": "2024-05-01T11:59:00Z", "instrument": "BTC/USD", "price": 50000.0, "volume": 1.0},
            {"timestamp": "2024-05-01T11:59:30Z", "instrument": "ETH/USD", "price": 3000.0, "volume": 10.0}
        ]"#;

        let trades = parse_trades(json).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].instrument.as_str(), "BTC/USD");
        assert_eq!(trades[1].timestamp, EPOCH - Duration::seconds(30));
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let json = r#"[{"timestamp": "yesterday", "instrument": "BTC/USD", "price": 1.0, "volume": 1.0}]"#;
        assert!(parse_trades(json).is_err());
    }

    #[test]
    fn test_load_trades_file() {
        let path = std::env::temp_dir().join(format!("vwap_trades_{}.json", std::process::id()));
        let json = serde_json::to_string(&demo_trades(EPOCH)).unwrap();
        std::fs::write(&path, json).unwrap();

        let trades = load_trades(&path).unwrap();
        assert_eq!(trades, demo_trades(EPOCH));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_trades(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, VwapError::Io(_)));
    }
}
