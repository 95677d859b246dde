//! AR order selection by BIC.
//!
//! The search fits AR(k) for every `k` in `1..=max_lag` and computes:
//! - SSE on the common sample `max_lag..n`
//! - BIC = n * ln(SSE/n) + (k + 1) * ln(n)
//!
//! Selection rules:
//! 1. Skip underdetermined orders: require `n >= (k + 1) + 5`
//! 2. Choose the order with strictly minimum BIC; on exact ties the lower
//!    order wins
//! 3. Report the plain autocorrelations at lags `1..=k*` as the rho values

use log::{debug, info};

use crate::analysis::correlogram::acf;
use crate::analysis::error::{AnalysisError, Result};
use crate::domain::{LagCandidate, LagSelection, TimeSeries};
use crate::fit::fitter::{ArFit, FitOutcome, fit_orders};
use crate::math::stats::finite;

/// Choose the AR order minimising BIC and return the matching ACF values.
pub fn select_best_lag(series: &TimeSeries, max_lag: usize) -> Result<LagSelection> {
    if max_lag == 0 {
        return Err(AnalysisError::InvalidParameter("max_lag must be >= 1".to_string()));
    }

    let x = finite(series.values());
    if x.len() <= max_lag {
        return Err(AnalysisError::InsufficientData {
            needed: max_lag + 1,
            got: x.len(),
        });
    }

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    for (order, outcome) in fit_orders(&x, max_lag) {
        match outcome {
            FitOutcome::Fitted(fit) => candidates.push(to_candidate(&fit)),
            FitOutcome::Skipped(reason) => {
                debug!("AR({order}) skipped: {reason}");
                skipped.push((order, reason));
            }
        }
    }

    let best = select_by_bic(&candidates).ok_or(AnalysisError::NoValidModel { max_lag })?;
    let best_lag = best.order;

    let rho_values = acf(&x, best_lag)?[1..].to_vec();
    info!(
        "BIC selected AR({best_lag}) for `{}` (bic={:.4}); rho={rho_values:?}",
        series.name(),
        best.bic
    );

    Ok(LagSelection {
        best_lag,
        rho_values,
        candidates,
        skipped,
    })
}

fn to_candidate(fit: &ArFit) -> LagCandidate {
    LagCandidate {
        order: fit.order,
        intercept: fit.intercept,
        coefficients: fit.coefficients.clone(),
        sse: fit.sse,
        bic: bic(fit.n_obs, fit.sse, fit.param_count()),
        n_obs: fit.n_obs,
    }
}

fn bic(n: usize, sse: f64, k: usize) -> f64 {
    let n_f = n as f64;
    let sse_per = (sse / n_f).max(1e-12);
    n_f * sse_per.ln() + (k as f64) * n_f.ln()
}

/// First candidate (in increasing order) with the strictly lowest finite BIC.
fn select_by_bic(candidates: &[LagCandidate]) -> Option<&LagCandidate> {
    candidates
        .iter()
        .filter(|c| c.bic.is_finite())
        .fold(None, |best: Option<&LagCandidate>, c| match best {
            Some(b) if c.bic >= b.bic => Some(b),
            _ => Some(c),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_MAX_LAG;
    use crate::testutil::{ar1, normals, monthly};

    fn candidate(order: usize, bic: f64) -> LagCandidate {
        LagCandidate {
            order,
            intercept: 0.0,
            coefficients: vec![0.0; order],
            sse: 1.0,
            bic,
            n_obs: 100,
        }
    }

    #[test]
    fn ties_keep_the_lower_order() {
        let cands = vec![candidate(1, 5.0), candidate(2, 3.0), candidate(3, 3.0)];
        assert_eq!(select_by_bic(&cands).unwrap().order, 2);
    }

    #[test]
    fn non_finite_bic_is_ignored() {
        let cands = vec![candidate(1, f64::NAN), candidate(2, 7.0)];
        assert_eq!(select_by_bic(&cands).unwrap().order, 2);
        assert!(select_by_bic(&[]).is_none());
    }

    #[test]
    fn bic_penalises_extra_parameters() {
        assert!(bic(100, 10.0, 3) > bic(100, 10.0, 2));
    }

    #[test]
    fn long_ar1_sample_selects_lag_one() {
        let series = monthly("ar1", ar1(14, 600, 0.4));
        let selection = select_best_lag(&series, 10).unwrap();
        assert_eq!(selection.best_lag, 1);
        assert_eq!(selection.rho_values.len(), 1);
        assert!((selection.rho_values[0] - 0.4).abs() < 0.05);
        assert_eq!(selection.candidates.len(), 10);
    }

    #[test]
    fn sixty_month_ar1_selects_lag_one_with_default_max_lag() {
        let series = monthly("ar1", ar1(4, 60, 0.4));
        let selection = select_best_lag(&series, DEFAULT_MAX_LAG).unwrap();
        assert_eq!(selection.best_lag, 1);
        assert!((selection.rho_values[0] - 0.4).abs() < 0.15);
        // 30 common observations leave room for AR(1)..AR(24) only.
        assert_eq!(selection.candidates.len(), 24);
        assert_eq!(selection.skipped.first().map(|(k, _)| *k), Some(25));
    }

    #[test]
    fn white_noise_rho_values_match_lag_count() {
        let series = monthly("noise", normals(21, 300));
        let selection = select_best_lag(&series, 6).unwrap();
        assert_eq!(selection.rho_values.len(), selection.best_lag);
    }

    #[test]
    fn too_short_series_is_insufficient() {
        let series = monthly("short", ar1(1, 30, 0.4));
        let err = select_best_lag(&series, 30).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 31, got: 30 });
    }

    #[test]
    fn all_orders_skipped_is_no_valid_model() {
        let series = monthly("short", ar1(1, 31, 0.4));
        let err = select_best_lag(&series, 30).unwrap_err();
        assert_eq!(err, AnalysisError::NoValidModel { max_lag: 30 });
    }
}
