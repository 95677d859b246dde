//! `unsmooth` library crate.
//!
//! The binary (`unsmooth`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the analysis stages are reusable from other tools or notebooks
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;

#[cfg(test)]
mod testutil;
