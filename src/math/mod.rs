//! Mathematical utilities: least squares, lag helpers, and descriptive statistics.

pub mod lagged;
pub mod ols;
pub mod stats;

pub use ols::*;
