//! JSON run summaries.
//!
//! A summary is the portable record of one run: configuration, every stage's
//! result, and the before/after comparison. The unsmoothed values themselves
//! go to the CSV export.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{AdfResult, AnalysisConfig, LagSelection, PerformanceComparison, SignificantLags};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub tool: &'static str,
    pub series: &'a str,
    pub frequency: &'static str,
    pub n_observations: usize,
    pub config: &'a AnalysisConfig,
    pub stationarity: &'a AdfResult,
    pub verdict: String,
    pub lag_selection: &'a LagSelection,
    pub significance: &'a SignificantLags,
    pub performance: &'a PerformanceComparison,
}

impl<'a> RunSummary<'a> {
    pub fn new(run: &'a RunOutput, config: &'a AnalysisConfig) -> Self {
        Self {
            tool: "unsmooth",
            series: run.reported.name(),
            frequency: run.reported.frequency().label(),
            n_observations: run.reported.len(),
            config,
            stationarity: &run.stationarity,
            verdict: run.stationarity.verdict().to_string(),
            lag_selection: &run.lag_selection,
            significance: &run.significance,
            performance: &run.performance,
        }
    }
}

/// Write a run summary JSON file.
pub fn write_summary_json(path: &Path, run: &RunOutput, config: &AnalysisConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &RunSummary::new(run, config))
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis;
    use crate::testutil::{ar1, monthly};

    #[test]
    fn summary_serializes_stage_results() {
        let values: Vec<f64> = ar1(4, 120, 0.4).iter().map(|v| 0.01 * v).collect();
        let series = monthly("fund", values);
        let config = AnalysisConfig {
            max_lag: 6,
            nlags: 10,
            ..AnalysisConfig::default()
        };
        let run = run_analysis(&series, &config).unwrap();

        let json = serde_json::to_value(RunSummary::new(&run, &config)).unwrap();
        assert_eq!(json["series"], "fund");
        assert_eq!(json["frequency"], "M");
        assert_eq!(json["lag_selection"]["best_lag"], 1);
        assert!(json["stationarity"]["critical_values"]["five_pct"].is_number());
        assert_eq!(json["config"]["verbosity"], "normal");
    }
}
