//! Stationarity checking with the Augmented Dickey-Fuller test.
//!
//! Test regression (constant, no trend):
//!
//! ```text
//! Δy_t = α + γ·y_{t-1} + Σ_{i=1..p} δ_i·Δy_{t-i} + ε_t
//! ```
//!
//! The statistic is the t-value of `γ` under the null `γ = 0` (unit root).
//!
//! Lag order `p` is chosen by minimum AIC over `0..=max_lag`, with every
//! candidate estimated on the same sample so the criteria are comparable. The
//! chosen regression is then re-estimated on its own longest sample.
//!
//! P-values use MacKinnon's (1994) response-surface approximation; critical
//! values use MacKinnon's (2010) finite-sample polynomials.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::{AdfResult, CriticalValues, TimeSeries};
use crate::math::lagged::diff;
use crate::math::stats::{finite, is_constant, normal_cdf};
use crate::math::{ols, standard_errors};

/// Fewest non-missing observations accepted by the test.
pub const MIN_ADF_OBSERVATIONS: usize = 20;

// MacKinnon (1994), constant-only regression, one series.
const TAU_MAX_C: f64 = 2.74;
const TAU_MIN_C: f64 = -18.83;
const TAU_STAR_C: f64 = -1.61;
const TAU_C_SMALLP: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_C_LARGEP: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

// MacKinnon (2010) critical value polynomials in 1/T for 1%, 5%, 10%.
const TAU_C_2010: [[f64; 4]; 3] = [
    [-3.43035, -6.5393, -16.786, -79.433],
    [-2.86154, -2.8903, -4.234, -40.040],
    [-2.56677, -1.5384, -2.809, 0.0],
];

/// Run the ADF test on `series`, dropping missing observations first.
pub fn check_stationarity(series: &TimeSeries) -> Result<AdfResult> {
    let observed = series.dropna();
    if observed.len() < series.len() {
        debug!(
            "ADF on `{}`: dropped {} missing observations",
            series.name(),
            series.len() - observed.len()
        );
    }
    let result = adf_test(observed.values(), None)?;
    info!(
        "ADF on `{}`: statistic={:.4} p={:.4} lag={} n={} -> {}",
        series.name(),
        result.statistic,
        result.p_value,
        result.used_lag,
        result.n_obs,
        result.verdict()
    );
    Ok(result)
}

/// ADF test on raw values. `max_lag = None` uses `ceil(12·(n/100)^¼)`.
pub fn adf_test(values: &[f64], max_lag: Option<usize>) -> Result<AdfResult> {
    let x = finite(values);
    let n = x.len();
    if n < MIN_ADF_OBSERVATIONS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_ADF_OBSERVATIONS,
            got: n,
        });
    }
    if is_constant(&x) {
        return Err(AnalysisError::DegenerateSeries(
            "series is constant; the ADF regression is undefined".to_string(),
        ));
    }

    // Leave room for the constant and the level regressor.
    let cap = n / 2 - 2;
    let max_lag = max_lag
        .unwrap_or_else(|| (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize)
        .min(cap);

    let dx = diff(&x);
    let used_lag = select_lag_by_aic(&x, &dx, max_lag)?;

    let (design, target) = adf_regression(&x, &dx, used_lag, used_lag);
    let fit = ols(&design, &target).ok_or_else(|| {
        AnalysisError::DegenerateSeries("ADF regression could not be solved".to_string())
    })?;
    let se = standard_errors(&design, &fit).ok_or_else(|| {
        AnalysisError::DegenerateSeries("ADF regression is singular".to_string())
    })?;
    if !(se[1] > 0.0) {
        return Err(AnalysisError::DegenerateSeries(
            "zero standard error on the lagged level".to_string(),
        ));
    }

    let statistic = fit.beta[1] / se[1];
    let n_obs = fit.n_obs;

    Ok(AdfResult {
        statistic,
        p_value: mackinnon_p_value(statistic),
        critical_values: mackinnon_critical_values(n_obs),
        used_lag,
        n_obs,
    })
}

/// Pick the augmentation lag by minimum AIC on the common sample `max_lag..`.
fn select_lag_by_aic(x: &[f64], dx: &[f64], max_lag: usize) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;

    for lag in 0..=max_lag {
        let (design, target) = adf_regression(x, dx, lag, max_lag);
        let Some(fit) = ols(&design, &target) else {
            debug!("ADF lag {lag}: regression failed, skipped");
            continue;
        };
        let aic = fit.aic();
        debug!("ADF lag {lag}: aic={aic:.4}");
        if aic.is_finite() && best.is_none_or(|(_, b)| aic < b) {
            best = Some((lag, aic));
        }
    }

    best.map(|(lag, _)| lag).ok_or_else(|| {
        AnalysisError::DegenerateSeries("no ADF lag order could be estimated".to_string())
    })
}

/// Build the ADF design for `lag` augmentation terms, starting at `start`.
///
/// Row for position `t` (indexing `dx`): target `dx[t]`, regressors
/// `[1, x[t], dx[t-1], ..., dx[t-lag]]`.
fn adf_regression(x: &[f64], dx: &[f64], lag: usize, start: usize) -> (DMatrix<f64>, DVector<f64>) {
    let rows = dx.len() - start;
    let cols = lag + 2;

    let design = DMatrix::from_fn(rows, cols, |i, j| {
        let t = start + i;
        match j {
            0 => 1.0,
            1 => x[t],
            _ => dx[t - (j - 1)],
        }
    });
    let target = DVector::from_fn(rows, |i, _| dx[start + i]);

    (design, target)
}

/// Approximate asymptotic p-value of the ADF statistic.
pub fn mackinnon_p_value(stat: f64) -> f64 {
    if stat.is_nan() {
        return f64::NAN;
    }
    if stat > TAU_MAX_C {
        return 1.0;
    }
    if stat < TAU_MIN_C {
        return 0.0;
    }

    let poly = if stat <= TAU_STAR_C {
        polyval(&TAU_C_SMALLP, stat)
    } else {
        polyval(&TAU_C_LARGEP, stat)
    };
    normal_cdf(poly)
}

/// Finite-sample critical values for a regression with `n_obs` observations.
pub fn mackinnon_critical_values(n_obs: usize) -> CriticalValues {
    let t = n_obs as f64;
    let cv = |c: &[f64; 4]| c[0] + c[1] / t + c[2] / (t * t) + c[3] / (t * t * t);

    CriticalValues {
        one_pct: cv(&TAU_C_2010[0]),
        five_pct: cv(&TAU_C_2010[1]),
        ten_pct: cv(&TAU_C_2010[2]),
    }
}

/// Evaluate `c[0] + c[1]·x + c[2]·x² + ...`.
fn polyval(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
