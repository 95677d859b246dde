//! Property-based tests for the analysis stages.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated return series.

use proptest::prelude::*;
use ::unsmooth::analysis::{acf, correlogram, unsmooth};
use ::unsmooth::data::month_ends;
use ::unsmooth::domain::{Frequency, TimeSeries};
use ::unsmooth::fit::select_best_lag;

fn make_ts(values: &[f64]) -> TimeSeries {
    let index = month_ends(1990, 1, values.len()).unwrap();
    TimeSeries::new("prop", Frequency::Monthly, index, values.to_vec()).unwrap()
}

/// Return-like values with a small trend so the series is never constant.
fn returns_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(-0.05..0.05_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 1e-5;
            }
            v
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unsmoothing_drops_exactly_order_observations(
        values in returns_strategy(20, 80),
        rho in prop::collection::vec(-0.9..0.9_f64, 1..4),
    ) {
        let series = make_ts(&values);
        let order = rho.len();
        let out = unsmooth(&series, &rho, order).unwrap();
        prop_assert_eq!(out.len(), values.len() - order);
        prop_assert_eq!(out.index(), &series.index()[order..]);
    }

    #[test]
    fn zero_rho_is_identity_on_the_truncated_index(
        values in returns_strategy(10, 60),
        order in 1usize..4,
    ) {
        let series = make_ts(&values);
        let out = unsmooth(&series, &vec![0.0; order], order).unwrap();
        for (a, b) in out.values().iter().zip(&values[order..]) {
            prop_assert!((a - b).abs() < 1e-15);
        }
    }

    #[test]
    fn autocorrelations_are_bounded(values in returns_strategy(30, 120)) {
        let r = acf(&values, 10).unwrap();
        prop_assert_eq!(r[0], 1.0);
        for v in &r[1..] {
            prop_assert!(v.abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn confidence_intervals_contain_their_estimate(values in returns_strategy(40, 120)) {
        let cg = correlogram(&make_ts(&values), 10, 0.05).unwrap();
        for (r, (lo, hi)) in cg.acf.iter().zip(&cg.acf_confint) {
            prop_assert!(lo <= r && r <= hi);
        }
        for (r, (lo, hi)) in cg.pacf.iter().zip(&cg.pacf_confint) {
            prop_assert!(lo <= r && r <= hi);
        }
    }

    #[test]
    fn selected_lag_is_within_range(values in returns_strategy(60, 150), max_lag in 1usize..8) {
        let selection = select_best_lag(&make_ts(&values), max_lag).unwrap();
        prop_assert!((1..=max_lag).contains(&selection.best_lag));
        prop_assert_eq!(selection.rho_values.len(), selection.best_lag);
        prop_assert_eq!(selection.candidates.len() + selection.skipped.len(), max_lag);
    }
}
