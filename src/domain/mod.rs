//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the series containers (`TimeSeries`, `ReturnTable`) and `Frequency`
//! - stage outputs (`AdfResult`, `LagSelection`, `SignificantLags`, ...)
//! - the run configuration (`AnalysisConfig`, `Verbosity`)

pub mod config;
pub mod results;
pub mod types;

pub use config::*;
pub use results::*;
pub use types::*;
