//! Synthetic appraisal-smoothed return generation.
//!
//! The generator draws i.i.d. Gaussian "economic" returns and passes them
//! through the appraisal smoothing filter
//!
//! ```text
//! s[0] = r[0]
//! s[t] = (1 - ρ)·r[t] + ρ·s[t-1]
//! ```
//!
//! which is exactly what a first-order unsmoothing with the same `ρ` inverts.
//! Useful for demos and for checking the pipeline end to end.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::Serialize;

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::{Frequency, TimeSeries};

/// Parameters of a synthetic sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleConfig {
    pub n: usize,
    /// Period length of the generated index; also drives annualization.
    pub frequency: Frequency,
    /// Smoothing coefficient applied to the raw returns.
    pub rho: f64,
    /// Per-period mean of the raw returns.
    pub mean: f64,
    /// Per-period standard deviation of the raw returns.
    pub sigma: f64,
    pub seed: u64,
    pub start_year: i32,
    pub start_month: u32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            n: 120,
            frequency: Frequency::Monthly,
            rho: 0.4,
            mean: 0.005,
            sigma: 0.02,
            seed: 42,
            start_year: 2010,
            start_month: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleData {
    /// The unobserved economic returns.
    pub raw: TimeSeries,
    /// What an appraisal-based index would report.
    pub smoothed: TimeSeries,
    pub config: SampleConfig,
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData> {
    if config.n < 2 {
        return Err(AnalysisError::InvalidParameter("Sample count must be >= 2.".to_string()));
    }
    if !(config.rho.is_finite() && config.rho.abs() < 1.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "Smoothing rho must lie in (-1, 1), got {}",
            config.rho
        )));
    }
    if !(config.mean.is_finite() && config.sigma.is_finite() && config.sigma > 0.0) {
        return Err(AnalysisError::InvalidParameter(
            "Invalid mean/sigma for return generation.".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(config.mean, config.sigma)
        .map_err(|e| AnalysisError::InvalidParameter(format!("Noise distribution error: {e}")))?;

    let raw: Vec<f64> = (0..config.n).map(|_| normal.sample(&mut rng)).collect();
    let smoothed = smooth_returns(&raw, config.rho);
    let index = period_ends(config.frequency, config.start_year, config.start_month, config.n)?;

    Ok(SampleData {
        raw: TimeSeries::new("raw", config.frequency, index.clone(), raw)?,
        smoothed: TimeSeries::new("smoothed", config.frequency, index, smoothed)?,
        config: config.clone(),
    })
}

/// Apply first-order appraisal smoothing.
pub fn smooth_returns(raw: &[f64], rho: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(raw.len());
    for (t, &r) in raw.iter().enumerate() {
        let s = if t == 0 { r } else { (1.0 - rho) * r + rho * out[t - 1] };
        out.push(s);
    }
    out
}

/// `n` consecutive period-end dates, starting with the period that contains
/// `year-month`.
///
/// Monthly and quarterly periods end on the last calendar day; daily periods
/// are weekdays starting on the first of the month.
pub fn period_ends(frequency: Frequency, year: i32, month: u32, n: usize) -> Result<Vec<NaiveDate>> {
    if !(1..=12).contains(&month) {
        return Err(AnalysisError::InvalidParameter(format!("Invalid month: {month}")));
    }

    match frequency {
        Frequency::Monthly => stepped_month_ends(year, month, 1, n),
        Frequency::Quarterly => stepped_month_ends(year, (month - 1) / 3 * 3 + 3, 3, n),
        Frequency::Daily => weekdays(year, month, n),
    }
}

/// `n` consecutive month-end dates starting with the month `year-month`.
pub fn month_ends(year: i32, month: u32, n: usize) -> Result<Vec<NaiveDate>> {
    period_ends(Frequency::Monthly, year, month, n)
}

fn stepped_month_ends(year: i32, month: u32, step: u32, n: usize) -> Result<Vec<NaiveDate>> {
    let mut out = Vec::with_capacity(n);
    let (mut y, mut m) = (year, month);
    for _ in 0..n {
        let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
        let end = NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| AnalysisError::InvalidParameter(format!("Date out of range: {y}-{m}")))?;
        out.push(end);

        let next = m + step;
        (y, m) = if next > 12 { (y + 1, next - 12) } else { (y, next) };
    }
    Ok(out)
}

fn weekdays(year: i32, month: u32, n: usize) -> Result<Vec<NaiveDate>> {
    let out_of_range = || AnalysisError::InvalidParameter(format!("Date out of range: {year}-{month}"));

    let mut day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(day);
        }
        day = day.succ_opt().ok_or_else(out_of_range)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ends_cross_year_and_leap_february() {
        let d = month_ends(2023, 11, 4).unwrap();
        let expected = [
            NaiveDate::from_ymd_opt(2023, 11, 30).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        ];
        assert_eq!(d, expected);
    }

    #[test]
    fn quarter_ends_start_at_the_enclosing_quarter() {
        let d = period_ends(Frequency::Quarterly, 2023, 11, 3).unwrap();
        let expected = [
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        ];
        assert_eq!(d, expected);
    }

    #[test]
    fn daily_index_skips_weekends() {
        // 2024-06-01 is a Saturday.
        let d = period_ends(Frequency::Daily, 2024, 6, 6).unwrap();
        assert_eq!(d[0], NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(d[5], NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert!(d.iter().all(|day| day.weekday().number_from_monday() <= 5));
    }

    #[test]
    fn sample_carries_the_requested_frequency() {
        let config = SampleConfig {
            n: 40,
            frequency: Frequency::Quarterly,
            ..SampleConfig::default()
        };
        let sample = generate_sample(&config).unwrap();
        assert_eq!(sample.raw.frequency(), Frequency::Quarterly);
        assert_eq!(sample.smoothed.frequency(), Frequency::Quarterly);
        assert_eq!(sample.smoothed.index()[1], NaiveDate::from_ymd_opt(2010, 6, 30).unwrap());
    }

    #[test]
    fn smoothing_is_an_exponential_filter() {
        let s = smooth_returns(&[1.0, 0.0, 0.0], 0.5);
        assert_eq!(s, vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn sample_is_reproducible_and_smoother() {
        let config = SampleConfig {
            n: 240,
            rho: 0.6,
            ..SampleConfig::default()
        };
        let a = generate_sample(&config).unwrap();
        let b = generate_sample(&config).unwrap();
        assert_eq!(a.raw, b.raw);
        assert_eq!(a.smoothed.len(), 240);
        assert!(a.smoothed.std() < a.raw.std());
    }

    #[test]
    fn rejects_unit_rho() {
        let config = SampleConfig {
            rho: 1.0,
            ..SampleConfig::default()
        };
        assert!(generate_sample(&config).is_err());
    }
}
