//! Shared analysis pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! stationarity -> BIC lag selection -> significance scan -> unsmoothing -> comparison
//!
//! The CLI subcommands can then focus on where the series comes from and how
//! results are presented.

use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::collections::HashMap;

use crate::analysis::{self, AnalysisError, check_stationarity, determine_rho_and_lag, unsmooth};
use crate::domain::{
    AdfResult, AnalysisConfig, LagSelection, PerformanceComparison, PerformanceStats, SeriesInput,
    SignificantLags, TimeSeries,
};
use crate::fit::select_best_lag;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub reported: TimeSeries,
    pub stationarity: AdfResult,
    pub lag_selection: LagSelection,
    pub significance: SignificantLags,
    pub unsmoothed: TimeSeries,
    pub performance: PerformanceComparison,
}

/// Execute the full pipeline on a series (or single-column table).
///
/// The stationarity verdict is informational; it never changes later stages.
/// Unsmoothing uses the BIC-selected order and its rho values.
pub fn run_analysis<S: SeriesInput + ?Sized>(
    input: &S,
    config: &AnalysisConfig,
) -> Result<RunOutput, AnalysisError> {
    config.validate()?;
    let reported = input.as_series()?.into_owned();
    info!(
        "analysing `{}` ({} observations, frequency {})",
        reported.name(),
        reported.len(),
        reported.frequency().label()
    );

    // 1) Stationarity (informational).
    let stationarity = check_stationarity(&reported)?;

    // 2) Best AR order + rho values.
    let lag_selection = select_best_lag(&reported, config.max_lag)?;

    // 3) Significance scan over the correlogram.
    let significance = determine_rho_and_lag(&reported, config.nlags, config.alpha)?;

    // 4) Unsmooth with the BIC order.
    let unsmoothed = unsmooth(&reported, &lag_selection.rho_values, lag_selection.best_lag)?;

    // 5) Before/after comparison.
    let performance = PerformanceComparison {
        reported: analysis::performance(&reported)?,
        unsmoothed: analysis::performance(&unsmoothed)?,
    };

    Ok(RunOutput {
        reported,
        stationarity,
        lag_selection,
        significance,
        unsmoothed,
        performance,
    })
}

/// How well an unsmoothed series matches known true returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryCheck {
    /// Root-mean-square difference over the shared dates.
    pub rmse: f64,
    pub n_common: usize,
    pub truth: PerformanceStats,
}

/// Compare `estimate` with `truth` on their common dates.
pub fn recovery_check(truth: &TimeSeries, estimate: &TimeSeries) -> Result<RecoveryCheck, AnalysisError> {
    let by_date: HashMap<NaiveDate, f64> = truth
        .index()
        .iter()
        .copied()
        .zip(truth.values().iter().copied())
        .collect();

    let diffs: Vec<f64> = estimate
        .index()
        .iter()
        .zip(estimate.values())
        .filter_map(|(d, v)| by_date.get(d).map(|t| v - t))
        .filter(|d| d.is_finite())
        .collect();

    if diffs.is_empty() {
        return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
    }

    let rmse = (diffs.iter().map(|d| d * d).sum::<f64>() / diffs.len() as f64).sqrt();
    Ok(RecoveryCheck {
        rmse,
        n_common: diffs.len(),
        truth: analysis::performance(truth)?,
    })
}
