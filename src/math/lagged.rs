//! Position-based lag helpers.
//!
//! All operations work on positions, not on calendar time. Missing values are
//! `f64::NAN` and propagate through arithmetic.

/// Delay `values` by `k` positions; the first `k` slots become missing.
pub fn shift(values: &[f64], k: usize) -> Vec<f64> {
    let n = values.len();
    let k = k.min(n);
    let mut out = vec![f64::NAN; k];
    out.extend_from_slice(&values[..n - k]);
    out
}

/// First differences `x[t+1] - x[t]` (length `n - 1`).
pub fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Subtract the mean from every value.
pub fn demean(values: &[f64]) -> Vec<f64> {
    let mean = crate::math::stats::mean(values);
    values.iter().map(|v| v - mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_beyond_length_is_all_missing() {
        let out = shift(&[1.0, 2.0], 5);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn shift_zero_is_identity() {
        assert_eq!(shift(&[1.0, 2.0, 3.0], 0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn diff_and_demean() {
        assert_eq!(diff(&[1.0, 4.0, 9.0]), vec![3.0, 5.0]);
        assert_eq!(demean(&[1.0, 2.0, 3.0]), vec![-1.0, 0.0, 1.0]);
    }
}
