//! Instrument identifiers
//!
//! Instruments are shared immutable strings ("BTC/USD"). Cloning is a refcount
//! bump, so trades and routing tables can hold them freely.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(Arc<str>);

impl Instrument {
    pub const BTC_USD: &'static str = "BTC/USD";
    pub const ETH_USD: &'static str = "ETH/USD";

    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Instrument {
    #[inline]
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Instrument {
    #[inline]
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl Borrow<str> for Instrument {
    #[inline(always)]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_instrument_equality() {
        let a = Instrument::new("BTC/USD");
        let b = Instrument::from(Instrument::BTC_USD);
        let c = Instrument::from(String::from("ETH/USD"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Instrument::new("BTC/USD");
        let b = a.clone();
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(Instrument::new("ETH/USD"), 1);
        assert_eq!(map.get("ETH/USD"), Some(&1));
        assert_eq!(map.get("SOL/USD"), None);
    }

    #[test]
    fn test_display_and_serde() {
        let eth = Instrument::new("ETH/USD");
        assert_eq!(eth.to_string(), "ETH/USD");
        assert_eq!(serde_json::to_string(&eth).unwrap(), "\"ETH/USD\"");
        let back: Instrument = serde_json::from_str("\"ETH/USD\"").unwrap();
        assert_eq!(back, eth);
    }
}
