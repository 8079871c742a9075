//! Linear-interpolated quantile over sorted data
//!
//! `idx = p * (n - 1)`; the result interpolates between the neighbours at
//! `floor(idx)` and `ceil(idx)`. The caller sorts; nothing here does.

/// Quantile `p` of ascending `sorted` data.
///
/// # Panics
/// Panics if `sorted` is empty. Use [`try_quantile`] when emptiness is possible.
#[inline]
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "quantile of empty data");
    interpolate(sorted, p)
}

/// Quantile `p` of ascending `sorted` data, `None` when empty.
#[inline]
pub fn try_quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(interpolate(sorted, p))
}

#[inline(always)]
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(
        sorted.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()),
        "quantile input must be sorted"
    );

    // NaN fraction clamps to 0
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let idx = p * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let lower_value = sorted[lower];
    let upper_value = sorted[upper];
    lower_value + (upper_value - lower_value) * (idx - lower as f64)
}
