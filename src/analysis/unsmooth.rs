//! Geltner / Okunev-White unsmoothing.
//!
//! For a reported series `r` and coefficients `ρ_1..ρ_m`:
//!
//! ```text
//! r*_t = r_t + Σ_{i=1..m} ρ_i / (1 - ρ_i) · (r_t - r_{t-i})
//! ```
//!
//! Every correction term uses the original series and its own shift. The first
//! `m` positions have no complete set of lags and are dropped.

use log::{debug, info};

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::TimeSeries;

/// Remove `order` lags of serial dependence from `series` using `rho`.
///
/// `rho[i]` is the coefficient for lag `i + 1`; only the first `order` entries
/// are used. Returns a series on the truncated index of the input.
pub fn unsmooth(series: &TimeSeries, rho: &[f64], order: usize) -> Result<TimeSeries> {
    if order == 0 {
        return Err(AnalysisError::InvalidParameter("order must be >= 1".to_string()));
    }
    if rho.len() < order {
        return Err(AnalysisError::InvalidParameter(format!(
            "need at least {order} rho values, got {}",
            rho.len()
        )));
    }
    if let Some(pos) = rho[..order].iter().position(|r| !r.is_finite()) {
        return Err(AnalysisError::InvalidParameter(format!(
            "rho at lag {} is not finite",
            pos + 1
        )));
    }
    if let Some(pos) = rho[..order].iter().position(|&r| r == 1.0) {
        return Err(AnalysisError::DegenerateCoefficient { lag: pos + 1, rho: rho[pos] });
    }
    if series.len() <= order {
        return Err(AnalysisError::InsufficientData {
            needed: order + 1,
            got: series.len(),
        });
    }

    let original = series.values();
    let mut result = original.to_vec();

    for (i, &r) in rho[..order].iter().enumerate() {
        let lag = i + 1;
        let weight = r / (1.0 - r);
        let shifted = series.shift(lag);
        debug!("unsmooth lag {lag}: rho={r:.6} weight={weight:.6}");

        for ((acc, &x), &x_lag) in result.iter_mut().zip(original).zip(&shifted) {
            *acc += weight * (x - x_lag);
        }
    }

    let (index, values): (Vec<_>, Vec<_>) = series
        .index()
        .iter()
        .zip(result)
        .filter(|(_, v)| v.is_finite())
        .map(|(d, v)| (*d, v))
        .unzip();

    info!(
        "unsmoothed `{}` with order {order}: {} -> {} observations",
        series.name(),
        series.len(),
        values.len()
    );

    TimeSeries::new(
        format!("{} (unsmoothed)", series.name()),
        series.frequency(),
        index,
        values,
    )
}
