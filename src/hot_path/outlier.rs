//! IQR outlier bounds
//!
//! Bounds are `[Q1 - k * IQR, Q3 + k * IQR]`, inclusive on both ends, where
//! `IQR = Q3 - Q1` and `k` is the configured multiplier (1.5 by default).

use super::quantile::try_quantile;

/// Outlier rejection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierParams {
    /// Lower quantile fraction (Q1)
    pub lower_quantile: f64,
    /// Upper quantile fraction (Q3)
    pub upper_quantile: f64,
    /// IQR multiplier
    pub iqr_multiplier: f64,
}

impl OutlierParams {
    pub const DEFAULT: Self = Self {
        lower_quantile: 0.25,
        upper_quantile: 0.75,
        iqr_multiplier: 1.5,
    };
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Acceptance range derived from a price sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Compute bounds from ascending prices. `None` for an empty sample.
    pub fn from_sorted(sorted: &[f64], params: &OutlierParams) -> Option<Self> {
        let q1 = try_quantile(sorted, params.lower_quantile)?;
        let q3 = try_quantile(sorted, params.upper_quantile)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - params.iqr_multiplier * iqr,
            upper: q3 + params.iqr_multiplier * iqr,
        })
    }

    /// True if `price` lies inside the bounds (inclusive). NaN never does.
    #[inline(always)]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}
