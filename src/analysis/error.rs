//! Error taxonomy for the analytical core.
//!
//! Every stage fails synchronously with one of these variants; nothing is
//! retried or recovered inside the library.

use thiserror::Error;

/// Result alias used throughout the analysis modules.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Not enough observations for the requested model or test.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Table-like input with the wrong number of data columns.
    #[error("exactly one column required, got {columns}")]
    Shape { columns: usize },

    /// Malformed arguments (rho list, order, nlags, alpha, frequency label...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The series itself prevents a well-defined result (e.g. zero variance).
    #[error("degenerate series: {0}")]
    DegenerateSeries(String),

    /// A smoothing coefficient of exactly 1 makes the correction undefined.
    #[error("degenerate coefficient: rho at lag {lag} is {rho}")]
    DegenerateCoefficient { lag: usize, rho: f64 },

    /// Every candidate autoregression failed or was skipped.
    #[error("no valid autoregressive model for lags 1..={max_lag}")]
    NoValidModel { max_lag: usize },

    /// Time index is malformed (length mismatch, duplicates, unsorted).
    #[error("invalid time index: {0}")]
    InvalidIndex(String),

    /// A named column is not present in the table.
    #[error("missing column: `{0}`")]
    MissingColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = AnalysisError::Shape { columns: 2 };
        assert_eq!(err.to_string(), "exactly one column required, got 2");

        let err = AnalysisError::InsufficientData { needed: 31, got: 12 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 31 observations, got 12"
        );

        let err = AnalysisError::DegenerateCoefficient { lag: 2, rho: 1.0 };
        assert!(err.to_string().contains("lag 2"));
    }
}
