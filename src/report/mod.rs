//! Terminal reports for analysis runs.

pub mod format;

pub use format::*;
