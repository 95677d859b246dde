//! Autocorrelation, partial autocorrelation, and significant-lag extraction.
//!
//! - ACF: biased autocovariance (divide by `n`) of the demeaned series,
//!   normalised by the lag-0 value. Confidence bands follow Bartlett's formula.
//! - PACF: OLS method. For each order `k` the demeaned series is regressed on an
//!   intercept and its first `k` lags over the longest available sample; the
//!   PACF at `k` is the coefficient on lag `k`. Bands are `± z / sqrt(n)`.
//!
//! Both bands are centred on the point estimate.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::{Correlogram, SeriesInput, SignificantLags};
use crate::math::lagged::demean;
use crate::math::ols;
use crate::math::stats::{finite, is_constant, normal_quantile};

/// Sample autocorrelations at lags `0..=nlags`.
///
/// Fails on series with fewer than two observations or zero variance.
pub fn acf(values: &[f64], nlags: usize) -> Result<Vec<f64>> {
    let n = values.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData { needed: 2, got: n });
    }
    if nlags >= n {
        return Err(AnalysisError::InsufficientData {
            needed: nlags + 1,
            got: n,
        });
    }
    if is_constant(values) {
        return Err(AnalysisError::DegenerateSeries(
            "autocorrelation of a constant series is undefined".to_string(),
        ));
    }

    let d = demean(values);
    let acov = |k: usize| -> f64 { (k..n).map(|t| d[t] * d[t - k]).sum::<f64>() / n as f64 };
    let c0 = acov(0);

    Ok((0..=nlags).map(|k| acov(k) / c0).collect())
}

/// Bartlett confidence intervals around `acf` (lag 0 has zero width).
pub fn acf_confint(acf: &[f64], n_obs: usize, alpha: f64) -> Vec<(f64, f64)> {
    let z = normal_quantile(1.0 - alpha / 2.0);
    let n = n_obs as f64;

    let mut cumulative = 0.0;
    acf.iter()
        .enumerate()
        .map(|(k, &r)| {
            let var = match k {
                0 => 0.0,
                1 => 1.0 / n,
                _ => {
                    cumulative += acf[k - 1] * acf[k - 1];
                    (1.0 + 2.0 * cumulative) / n
                }
            };
            let half = z * var.sqrt();
            (r - half, r + half)
        })
        .collect()
}

/// Partial autocorrelations at lags `0..=nlags` by successive OLS fits.
///
/// The lag-`nlags` regression has `nlags + 1` columns and `n - nlags` rows; it
/// must keep at least one residual degree of freedom, so `n >= 2·nlags + 2`.
pub fn pacf_ols(values: &[f64], nlags: usize) -> Result<Vec<f64>> {
    let n = values.len();
    if n < 2 * nlags + 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2 * nlags + 2,
            got: n,
        });
    }
    if is_constant(values) {
        return Err(AnalysisError::DegenerateSeries(
            "partial autocorrelation of a constant series is undefined".to_string(),
        ));
    }

    let x = demean(values);
    let mut out = Vec::with_capacity(nlags + 1);
    out.push(1.0);

    for k in 1..=nlags {
        let rows = n - k;
        let design = DMatrix::from_fn(rows, k + 1, |i, j| if j == 0 { 1.0 } else { x[k + i - j] });
        let target = DVector::from_fn(rows, |i, _| x[k + i]);

        let fit = ols(&design, &target).ok_or_else(|| {
            AnalysisError::DegenerateSeries(format!("PACF regression at lag {k} could not be solved"))
        })?;
        out.push(fit.beta[k]);
    }

    Ok(out)
}

/// Normal-approximation intervals `pacf ± z / sqrt(n)` (lag 0 has zero width).
pub fn pacf_confint(pacf: &[f64], n_obs: usize, alpha: f64) -> Vec<(f64, f64)> {
    let half = normal_quantile(1.0 - alpha / 2.0) / (n_obs as f64).sqrt();
    pacf.iter()
        .enumerate()
        .map(|(k, &r)| if k == 0 { (r, r) } else { (r - half, r + half) })
        .collect()
}

/// ACF and PACF with confidence intervals for the non-missing values of `input`.
pub fn correlogram<S: SeriesInput + ?Sized>(input: &S, nlags: usize, alpha: f64) -> Result<Correlogram> {
    validate_params(nlags, alpha)?;
    let series = input.as_series()?;
    let values = finite(series.values());
    let n_obs = values.len();

    let acf_values = acf(&values, nlags)?;
    let pacf_values = pacf_ols(&values, nlags)?;

    Ok(Correlogram {
        acf_confint: acf_confint(&acf_values, n_obs, alpha),
        pacf_confint: pacf_confint(&pacf_values, n_obs, alpha),
        acf: acf_values,
        pacf: pacf_values,
        alpha,
        n_obs,
    })
}

/// Flag the lags whose ACF point value lies strictly outside its own interval.
///
/// The comparison is against the lag's own band, not against zero. Lag 0 is
/// not tested. Accepts a series or a single-column table.
pub fn determine_rho_and_lag<S: SeriesInput + ?Sized>(
    input: &S,
    nlags: usize,
    alpha: f64,
) -> Result<SignificantLags> {
    let correlogram = correlogram(input, nlags, alpha)?;

    let (lags, rho_values): (Vec<usize>, Vec<f64>) = correlogram
        .acf
        .iter()
        .zip(&correlogram.acf_confint)
        .enumerate()
        .skip(1)
        .filter(|(_, (r, (lo, hi)))| **r < *lo || **r > *hi)
        .map(|(k, (r, _))| (k, *r))
        .unzip();

    let best_lag = lags.first().copied();
    match best_lag {
        Some(lag) => info!("first significant autocorrelation at lag {lag}"),
        None => info!("no lag in 1..={nlags} is significant at alpha={alpha}"),
    }
    debug!("significant lags: {lags:?}");

    Ok(SignificantLags {
        rho_values,
        best_lag,
        lags,
        correlogram,
    })
}

fn validate_params(nlags: usize, alpha: f64) -> Result<()> {
    if nlags == 0 {
        return Err(AnalysisError::InvalidParameter("nlags must be >= 1".to_string()));
    }
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "alpha must lie in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}
