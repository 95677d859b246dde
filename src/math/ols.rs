//! Ordinary least squares.
//!
//! Every estimator in this crate reduces to small, tall regression problems:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! - the ADF test regression (level + lagged differences)
//! - AR(k) fits during the BIC lag search
//! - the OLS partial autocorrelation
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Coefficient standard errors come from `(X^T X)^{-1}`; they are only needed
//!   for the ADF statistic, so they are computed on demand.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// A fitted linear regression.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: DVector<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    pub n_obs: usize,
    pub n_params: usize,
}

impl OlsFit {
    /// Gaussian log-likelihood at the ML variance estimate `ssr / n`.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.n_obs as f64;
        -0.5 * n * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.n_params as f64
    }

    /// Unbiased residual variance `ssr / (n - k)`.
    pub fn residual_variance(&self) -> Option<f64> {
        let dof = self.n_obs.checked_sub(self.n_params)?;
        if dof == 0 {
            return None;
        }
        Some(self.ssr / dof as f64)
    }
}

/// Fit `y ~ x` by least squares.
///
/// Returns `None` for empty or mismatched inputs, an underdetermined system, or
/// a numerically unsolvable design.
pub fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<OlsFit> {
    let (n, k) = x.shape();
    if n == 0 || k == 0 || n != y.len() || n < k {
        return None;
    }

    let beta = solve_least_squares(x, y)?;
    let ssr = (y - x * &beta).norm_squared();
    if !ssr.is_finite() {
        return None;
    }

    Some(OlsFit {
        beta,
        ssr,
        n_obs: n,
        n_params: k,
    })
}

/// Classical standard errors `sqrt(s^2 · diag((X^T X)^{-1}))`.
pub fn standard_errors(x: &DMatrix<f64>, fit: &OlsFit) -> Option<DVector<f64>> {
    let s2 = fit.residual_variance()?;
    let xtx_inv = (x.transpose() * x).try_inverse()?;
    let se = DVector::from_iterator(
        fit.n_params,
        (0..fit.n_params).map(|j| (s2 * xtx_inv[(j, j)]).max(0.0).sqrt()),
    );
    Some(se)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn standard_errors_match_closed_form() {
        // Simple regression: se(slope) = sqrt(s^2 / Σ(x - x̄)^2).
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [1.1, 2.9, 5.2, 6.8, 9.1];
        let x = DMatrix::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
        let y = DVector::from_row_slice(&ys);

        let fit = ols(&x, &y).unwrap();
        let se = standard_errors(&x, &fit).unwrap();

        let s2 = fit.ssr / 3.0;
        let sxx: f64 = xs.iter().map(|v| (v - 2.0) * (v - 2.0)).sum();
        assert!((se[1] - (s2 / sxx).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn underdetermined_is_rejected() {
        let x = DMatrix::from_element(2, 3, 1.0);
        let y = DVector::from_element(2, 1.0);
        assert!(ols(&x, &y).is_none());
    }

    #[test]
    fn aic_penalises_parameters() {
        let x = DMatrix::from_fn(4, 1, |_, _| 1.0);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);
        let fit = ols(&x, &y).unwrap();
        assert!((fit.aic() - (-2.0 * fit.log_likelihood() + 2.0)).abs() < 1e-12);
    }
}
