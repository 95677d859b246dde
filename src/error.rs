//! Application-level error carrying a process exit code.
//!
//! Exit codes:
//! - `2`: invalid input or configuration (bad CSV, bad flags, wrong shape)
//! - `3`: not enough data for the requested analysis
//! - `4`: numerical failure (degenerate series, no valid model)

use crate::analysis::AnalysisError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let exit_code = match err {
            AnalysisError::InsufficientData { .. } => 3,
            AnalysisError::DegenerateSeries(_)
            | AnalysisError::DegenerateCoefficient { .. }
            | AnalysisError::NoValidModel { .. } => 4,
            AnalysisError::Shape { .. }
            | AnalysisError::InvalidParameter(_)
            | AnalysisError::InvalidIndex(_)
            | AnalysisError::MissingColumn(_) => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_map_to_exit_codes() {
        let shape: AppError = AnalysisError::Shape { columns: 3 }.into();
        assert_eq!(shape.exit_code(), 2);
        assert_eq!(shape.to_string(), "exactly one column required, got 3");

        let short: AppError = AnalysisError::InsufficientData { needed: 20, got: 5 }.into();
        assert_eq!(short.exit_code(), 3);

        let flat: AppError = AnalysisError::DegenerateSeries("constant".to_string()).into();
        assert_eq!(flat.exit_code(), 4);
    }
}
