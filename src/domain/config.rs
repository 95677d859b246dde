//! Run configuration for the analysis pipeline.

use log::LevelFilter;
use serde::Serialize;

use crate::analysis::error::{AnalysisError, Result};
use crate::domain::Frequency;

/// Default largest AR order tried by the BIC search.
pub const DEFAULT_MAX_LAG: usize = 30;
/// Default number of correlogram lags.
pub const DEFAULT_NLAGS: usize = 20;
/// Default two-sided significance level for confidence intervals.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// How chatty the run is. Passed explicitly into the entry point and turned
/// into a logger filter there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map `-q` / repeated `-v` flags to a verbosity.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub max_lag: usize,
    pub nlags: usize,
    pub alpha: f64,
    pub frequency: Frequency,
    pub verbosity: Verbosity,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_lag: DEFAULT_MAX_LAG,
            nlags: DEFAULT_NLAGS,
            alpha: DEFAULT_ALPHA,
            frequency: Frequency::Monthly,
            verbosity: Verbosity::Normal,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_lag == 0 {
            return Err(AnalysisError::InvalidParameter("max_lag must be >= 1".to_string()));
        }
        if self.nlags == 0 {
            return Err(AnalysisError::InvalidParameter("nlags must be >= 1".to_string()));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
