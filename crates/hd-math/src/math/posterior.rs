//! Posterior normalization helpers.
//!
//! These helpers turn unnormalized marginal totals into probability
//! distributions. A distribution whose total is zero (or not finite) cannot be
//! normalized; callers get `None` and decide how to report it instead of
//! producing NaN.

use super::stable::CompensatedSum;

/// Divide every entry by the total of all entries.
///
/// Returns the total that was divided out, or `None` (leaving `values`
/// untouched) when the total is zero, negative, or not finite.
pub fn normalize_in_place(values: &mut [f64]) -> Option<f64> {
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let total = values.iter().copied().collect::<CompensatedSum>().value();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    for v in values.iter_mut() {
        *v /= total;
    }
    Some(total)
}

/// Check that a distribution sums to one within `tolerance`.
pub fn sums_to_one(values: &[f64], tolerance: f64) -> bool {
    let total = values.iter().copied().collect::<CompensatedSum>().value();
    (total - 1.0).abs() <= tolerance
}
