//! Autoregressive fitting and BIC lag selection.
//!
//! Responsibilities:
//!
//! - fit AR(k) candidates on a common sample (parallel)
//! - select the best order using BIC + guardrails

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
