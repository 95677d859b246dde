//! Result types produced by the analysis stages.
//!
//! All of these are plain values: computed once by a pure function and never
//! mutated afterwards. They derive `Serialize` so a run can be exported as JSON.

use std::fmt;

use serde::Serialize;

/// ADF critical values at the conventional significance levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    pub one_pct: f64,
    pub five_pct: f64,
    pub ten_pct: f64,
}

impl CriticalValues {
    /// `(label, value)` pairs in the order 1%, 5%, 10%.
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("1%", self.one_pct),
            ("5%", self.five_pct),
            ("10%", self.ten_pct),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationarityVerdict {
    LikelyStationary,
    LikelyNonStationary,
}

impl fmt::Display for StationarityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationarityVerdict::LikelyStationary => write!(f, "likely stationary"),
            StationarityVerdict::LikelyNonStationary => write!(f, "likely non-stationary"),
        }
    }
}

/// Augmented Dickey-Fuller test outcome (null: the series has a unit root).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfResult {
    pub statistic: f64,
    pub p_value: f64,
    pub critical_values: CriticalValues,
    /// Number of lagged differences in the test regression.
    pub used_lag: usize,
    /// Observations used in the test regression.
    pub n_obs: usize,
}

impl AdfResult {
    /// P-value threshold above which the unit root is not rejected.
    pub const SIGNIFICANCE: f64 = 0.05;

    pub fn verdict(&self) -> StationarityVerdict {
        if self.p_value > Self::SIGNIFICANCE {
            StationarityVerdict::LikelyNonStationary
        } else {
            StationarityVerdict::LikelyStationary
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.verdict() == StationarityVerdict::LikelyStationary
    }
}

/// Diagnostics of one AR(k) candidate in the BIC search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagCandidate {
    pub order: usize,
    pub intercept: f64,
    /// `coefficients[i]` multiplies the value `i + 1` periods back.
    pub coefficients: Vec<f64>,
    pub sse: f64,
    pub bic: f64,
    pub n_obs: usize,
}

/// Outcome of the BIC lag search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagSelection {
    pub best_lag: usize,
    /// `rho_values[i]` is the autocorrelation at lag `i + 1`.
    pub rho_values: Vec<f64>,
    /// Every candidate that was fit, in increasing order.
    pub candidates: Vec<LagCandidate>,
    /// Orders that were not fit and why.
    pub skipped: Vec<(usize, String)>,
}

impl LagSelection {
    /// Diagnostics of the selected order.
    pub fn best(&self) -> Option<&LagCandidate> {
        self.candidates.iter().find(|c| c.order == self.best_lag)
    }
}

/// ACF and PACF with their confidence intervals at lags `0..=nlags`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlogram {
    pub acf: Vec<f64>,
    pub acf_confint: Vec<(f64, f64)>,
    pub pacf: Vec<f64>,
    pub pacf_confint: Vec<(f64, f64)>,
    pub alpha: f64,
    pub n_obs: usize,
}

impl Correlogram {
    pub fn nlags(&self) -> usize {
        self.acf.len().saturating_sub(1)
    }
}

/// Lags whose ACF point estimate lies outside its own confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificantLags {
    /// ACF values of the significant lags, in lag order.
    pub rho_values: Vec<f64>,
    /// Lowest significant lag number, if any.
    pub best_lag: Option<usize>,
    /// Lag numbers matching `rho_values`.
    pub lags: Vec<usize>,
    pub correlogram: Correlogram,
}

/// Annualized figures for one return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub n_periods: usize,
}

/// Reported vs. unsmoothed performance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceComparison {
    pub reported: PerformanceStats,
    pub unsmoothed: PerformanceStats,
}

impl PerformanceComparison {
    /// Ratio of unsmoothed to reported annualized volatility.
    pub fn volatility_ratio(&self) -> f64 {
        self.unsmoothed.annualized_volatility / self.reported.annualized_volatility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adf(p_value: f64) -> AdfResult {
        AdfResult {
            statistic: -2.0,
            p_value,
            critical_values: CriticalValues {
                one_pct: -3.4,
                five_pct: -2.9,
                ten_pct: -2.6,
            },
            used_lag: 0,
            n_obs: 100,
        }
    }

    #[test]
    fn verdict_uses_five_percent_threshold() {
        assert_eq!(adf(0.2).verdict(), StationarityVerdict::LikelyNonStationary);
        assert_eq!(adf(0.05).verdict(), StationarityVerdict::LikelyStationary);
        assert_eq!(adf(0.01).verdict().to_string(), "likely stationary");
    }

    #[test]
    fn critical_values_are_listed_from_strictest() {
        let labels: Vec<&str> = adf(0.1).critical_values.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["1%", "5%", "10%"]);
        assert_eq!(adf(0.1).critical_values.entries()[1].1, -2.9);
    }
}
