//! Autoregressive least-squares fits for the lag search.
//!
//! Given a series `x` and a common estimation start `start`, an AR(k) fit solves
//!
//! ```text
//! x_t = c + φ_1·x_{t-1} + ... + φ_k·x_{t-k} + ε_t,   t = start..n
//! ```
//!
//! Using the same rows for every order keeps the SSE (and hence BIC) of
//! different orders comparable. Orders are independent, so a batch of them is
//! evaluated in parallel.

use log::debug;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::math::ols;

/// Minimum number of extra observations beyond parameter count.
pub const MIN_N_BUFFER: usize = 5;

/// Fitted AR(k) model on the common sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ArFit {
    pub order: usize,
    pub intercept: f64,
    /// `coefficients[i]` multiplies `x_{t-i-1}`.
    pub coefficients: Vec<f64>,
    pub sse: f64,
    pub n_obs: usize,
}

impl ArFit {
    /// Free parameters: the lag coefficients plus the intercept.
    pub fn param_count(&self) -> usize {
        self.order + 1
    }
}

/// Result of fitting one order: a model, or the reason it was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    Fitted(ArFit),
    Skipped(String),
}

/// Fit AR(order) on rows `start..x.len()`.
pub fn fit_ar(x: &[f64], order: usize, start: usize) -> FitOutcome {
    let n = x.len();
    if order == 0 || start < order || start >= n {
        return FitOutcome::Skipped(format!("invalid sample: order={order} start={start} n={n}"));
    }

    let rows = n - start;
    let k = order + 1;
    if rows < k + MIN_N_BUFFER {
        return FitOutcome::Skipped(format!(
            "Underdetermined: n={rows} < k+{MIN_N_BUFFER}={}",
            k + MIN_N_BUFFER
        ));
    }

    let design = DMatrix::from_fn(rows, k, |i, j| if j == 0 { 1.0 } else { x[start + i - j] });
    let target = DVector::from_fn(rows, |i, _| x[start + i]);

    let Some(fit) = ols(&design, &target) else {
        return FitOutcome::Skipped("least-squares solve failed".to_string());
    };

    FitOutcome::Fitted(ArFit {
        order,
        intercept: fit.beta[0],
        coefficients: fit.beta.iter().skip(1).copied().collect(),
        sse: fit.ssr,
        n_obs: rows,
    })
}

/// Fit every order in `1..=max_order` on the common sample `max_order..n`.
///
/// The output is in increasing order regardless of evaluation order.
pub fn fit_orders(x: &[f64], max_order: usize) -> Vec<(usize, FitOutcome)> {
    (1..=max_order)
        .into_par_iter()
        .map(|order| {
            let outcome = fit_ar(x, order, max_order);
            if let FitOutcome::Fitted(fit) = &outcome {
                debug!("AR({order}): sse={:.6e} n={}", fit.sse, fit.n_obs);
            }
            (order, outcome)
        })
        .collect()
}
