//! The analytical core: stationarity, correlograms, unsmoothing, annualization.
//!
//! The BIC lag search lives in `crate::fit` next to the AR fitting it drives.
//! Every function here is pure: inputs are borrowed, results are new values.

pub mod annualize;
pub mod correlogram;
pub mod error;
pub mod stationarity;
pub mod unsmooth;

pub use annualize::{annualize_returns, annualized_volatility, performance};
pub use correlogram::{acf, correlogram, determine_rho_and_lag, pacf_ols};
pub use error::{AnalysisError, Result};
pub use stationarity::{adf_test, check_stationarity};
pub use unsmooth::unsmooth;
