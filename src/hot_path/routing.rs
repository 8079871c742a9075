//! Trade router
//!
//! Splits a mixed batch into per-instrument batches for independent window
//! processing. The partition is stable: trades keep their input order inside
//! each group. Trades for instruments that are not tracked are dropped.

use crate::core::{Instrument, Trade};
use std::collections::{BTreeMap, BTreeSet};

/// Per-instrument trade batches, keyed in instrument order
pub type Partition = BTreeMap<Instrument, Vec<Trade>>;

/// Stable partition of `trades` by tracked instrument.
///
/// Every tracked instrument gets a key, even when its batch is empty.
pub fn partition_by_instrument(trades: &[Trade], instruments: &BTreeSet<Instrument>) -> Partition {
    let mut groups: Partition = instruments
        .iter()
        .map(|instrument| (instrument.clone(), Vec::new()))
        .collect();

    for trade in trades {
        if let Some(group) = groups.get_mut(&trade.instrument) {
            group.push(trade.clone());
        }
    }

    groups
}

/// Router over a fixed set of tracked instruments
#[derive(Debug, Clone)]
pub struct PairRouter {
    instruments: BTreeSet<Instrument>,
}

/// Router output with the count of trades that matched nothing
#[derive(Debug, Clone)]
pub struct RoutedBatch {
    pub groups: Partition,
    pub dropped: usize,
}

impl PairRouter {
    /// Create router tracking `instruments` (duplicates collapse)
    pub fn new<I, S>(instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Instrument>,
    {
        Self {
            instruments: instruments.into_iter().map(Into::into).collect(),
        }
    }

    /// Route a batch
    pub fn route(&self, trades: &[Trade]) -> RoutedBatch {
        let groups = partition_by_instrument(trades, &self.instruments);
        let routed: usize = groups.values().map(Vec::len).sum();
        let dropped = trades.len() - routed;

        if dropped > 0 {
            crate::log_engine!(
                tracing::Level::WARN,
                dropped,
                total = trades.len(),
                "dropped trades for untracked instruments"
            );
        }

        RoutedBatch { groups, dropped }
    }

    /// Tracked instruments in key order
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Check if an instrument is tracked
    pub fn is_tracked(&self, instrument: &str) -> bool {
        self.instruments.contains(instrument)
    }

    /// Number of tracked instruments
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::trade_at;
    use proptest::prelude::*;

    fn tracked() -> BTreeSet<Instrument> {
        ["BTC/USD", "ETH/USD"].into_iter().map(Instrument::from).collect()
    }

    #[test]
    fn test_partition_two_pairs() {
        let trades = vec![
            trade_at(60, "BTC/USD", 50_000.0, 1.0),
            trade_at(60, "ETH/USD", 3_000.0, 10.0),
            trade_at(60, "BTC/USD", 51_000.0, 1.5),
            trade_at(60, "ETH/USD", 3_100.0, 15.0),
        ];

        let groups = partition_by_instrument(&trades, &tracked());
        let btc: Vec<f64> = groups["BTC/USD"].iter().map(|t| t.price).collect();
        let eth: Vec<f64> = groups["ETH/USD"].iter().map(|t| t.price).collect();
        assert_eq!(btc, vec![50_000.0, 51_000.0]);
        assert_eq!(eth, vec![3_000.0, 3_100.0]);
    }

    #[test]
    fn test_unknown_dropped() {
        let trades = vec![
            trade_at(60, "SOL/USD", 150.0, 1.0),
            trade_at(60, "BTC/USD", 50_000.0, 1.0),
        ];

        let router = PairRouter::new(["BTC/USD", "ETH/USD"]);
        let batch = router.route(&trades);
        assert_eq!(batch.dropped, 1);
        assert_eq!(batch.groups["BTC/USD"].len(), 1);
        assert!(batch.groups["ETH/USD"].is_empty());
        assert!(!batch.groups.contains_key("SOL/USD"));
    }

    #[test]
    fn test_empty_batch_keeps_keys() {
        let groups = partition_by_instrument(&[], &tracked());
        assert_eq!(groups.len(), 2);
        assert!(groups.values().all(Vec::is_empty));
    }

    #[test]
    fn test_router_dedups_instruments() {
        let router = PairRouter::new(["BTC/USD", "BTC/USD", "ETH/USD"]);
        assert_eq!(router.len(), 2);
        assert!(router.is_tracked("ETH/USD"));
        assert!(!router.is_tracked("SOL/USD"));
        let names: Vec<&str> = router.instruments().map(Instrument::as_str).collect();
        assert_eq!(names, vec!["BTC/USD", "ETH/USD"]);
    }

    proptest! {
        #[test]
        fn prop_partition_is_stable_and_exclusive(
            picks in prop::collection::vec(0usize..3, 0..64)
        ) {
            let names = ["BTC/USD", "ETH/USD", "SOL/USD"];
            let trades: Vec<Trade> = picks
                .iter()
                .enumerate()
                .map(|(i, k)| trade_at(10, names[*k], i as f64, 1.0))
                .collect();

            let groups = partition_by_instrument(&trades, &tracked());

            // Every tracked trade appears exactly once, untracked never
            let routed: usize = groups.values().map(Vec::len).sum();
            let expected = picks.iter().filter(|k| **k < 2).count();
            prop_assert_eq!(routed, expected);

            for (instrument, group) in &groups {
                prop_assert!(group.iter().all(|t| &t.instrument == instrument));
                // Prices encode input position, so order must be increasing
                prop_assert!(group.windows(2).all(|w| w[0].price < w[1].price));
            }
        }
    }
}
