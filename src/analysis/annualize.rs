//! Annualized return and volatility of periodic returns.

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::{Frequency, PerformanceStats, TimeSeries};
use crate::math::stats::{finite, sample_std};

/// Compound periodic returns to an annual rate: `Π(1 + r)^(ppy / n) - 1`.
///
/// Missing values are ignored.
pub fn annualize_returns(values: &[f64], frequency: Frequency) -> Result<f64> {
    let returns = finite(values);
    if returns.is_empty() {
        return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
    }

    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    let exponent = f64::from(frequency.periods_per_year()) / returns.len() as f64;
    Ok(growth.powf(exponent) - 1.0)
}

/// Sample standard deviation scaled by `sqrt(periods per year)`.
pub fn annualized_volatility(values: &[f64], frequency: Frequency) -> Result<f64> {
    let returns = finite(values);
    if returns.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: returns.len(),
        });
    }
    Ok(sample_std(&returns) * f64::from(frequency.periods_per_year()).sqrt())
}

/// Both annualized figures for a series, using the series' own frequency.
pub fn performance(series: &TimeSeries) -> Result<PerformanceStats> {
    let frequency = series.frequency();
    Ok(PerformanceStats {
        annualized_return: annualize_returns(series.values(), frequency)?,
        annualized_volatility: annualized_volatility(series.values(), frequency)?,
        n_periods: finite(series.values()).len(),
    })
}
