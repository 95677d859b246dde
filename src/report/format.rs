//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::app::pipeline::{RecoveryCheck, RunOutput};
use crate::data::SampleConfig;
use crate::domain::{AdfResult, AnalysisConfig, LagSelection, PerformanceComparison, SignificantLags, TimeSeries};
use crate::io::ingest::IngestedReturns;

/// Correlogram rows printed in the terminal report.
const MAX_CORRELOGRAM_ROWS: usize = 12;

/// One-paragraph description of what was read from disk.
pub fn format_ingest_summary(ingest: &IngestedReturns, path: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("Input: {}\n", path.display()));
    out.push_str(&format!(
        "Rows: {} read | {} used | {} rejected\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Columns: {}\n",
        ingest.table.column_names().join(", ")
    ));
    out
}

/// Format the full run report (stationarity, lag search, correlogram, comparison).
pub fn format_run_report(run: &RunOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== unsmooth - Return Unsmoothing (Geltner / Okunev-White) ===\n");
    out.push_str(&format_series_header(&run.reported));
    out.push('\n');
    out.push_str(&format_stationarity(&run.stationarity));
    out.push('\n');
    out.push_str(&format_lag_selection(&run.lag_selection, config.max_lag));
    out.push('\n');
    out.push_str(&format_significance(&run.significance));
    out.push('\n');
    out.push_str(&format_performance(&run.performance, run.lag_selection.best_lag));

    out
}

fn format_series_header(series: &TimeSeries) -> String {
    let span = match (series.index().first(), series.index().last()) {
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "-".to_string(),
    };
    format!(
        "Series: {} | freq={} | n={} | {span} | mean={:.6} std={:.6}\n",
        series.name(),
        series.frequency().label(),
        series.len(),
        series.mean(),
        series.std()
    )
}

pub fn format_stationarity(adf: &AdfResult) -> String {
    let mut out = String::new();
    out.push_str("Stationarity (ADF, constant):\n");
    out.push_str(&format!(
        "  statistic={:.4} p-value={:.4} lags={} n={}\n",
        adf.statistic, adf.p_value, adf.used_lag, adf.n_obs
    ));
    let crit: Vec<String> = adf
        .critical_values
        .entries()
        .iter()
        .map(|(label, v)| format!("{label}={v:.4}"))
        .collect();
    out.push_str(&format!("  critical values: {}\n", crit.join(" ")));
    out.push_str(&format!("  verdict: {}\n", adf.verdict()));
    out
}

pub fn format_lag_selection(selection: &LagSelection, max_lag: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Lag selection (BIC, max lag {max_lag}):\n"));
    for c in &selection.candidates {
        let chosen = if c.order == selection.best_lag { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} AR({:<2}) SSE={:.6e} BIC={:.3} n={}\n",
            c.order, c.sse, c.bic, c.n_obs
        ));
    }
    for (order, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped AR({order})) {reason}\n"));
    }
    if let Some(best) = selection.best() {
        out.push_str(&format!(
            "  AR({}) fit: c={:.6} phi={}\n",
            best.order,
            best.intercept,
            fmt_vec(&best.coefficients)
        ));
    }
    out.push_str(&format!(
        "  best lag: {} | rho: {}\n",
        selection.best_lag,
        fmt_vec(&selection.rho_values)
    ));
    out
}

pub fn format_significance(sig: &SignificantLags) -> String {
    let cg = &sig.correlogram;
    let mut out = String::new();
    out.push_str(&format!(
        "Correlogram (alpha={}, n={}, {} lags):\n",
        cg.alpha,
        cg.n_obs,
        cg.nlags()
    ));
    out.push_str(&format!(
        "  {:>4} {:>9} {:>21} {:>9} {:>21}\n",
        "lag", "acf", "acf CI", "pacf", "pacf CI"
    ));

    let rows = cg.acf.len().min(MAX_CORRELOGRAM_ROWS + 1);
    for lag in 1..rows {
        out.push_str(&format!(
            "  {:>4} {:>9.4} {:>21} {:>9.4} {:>21}\n",
            lag,
            cg.acf[lag],
            fmt_interval(cg.acf_confint[lag]),
            cg.pacf[lag],
            fmt_interval(cg.pacf_confint[lag])
        ));
    }
    if cg.acf.len() > rows {
        out.push_str(&format!("  ... {} more lags\n", cg.acf.len() - rows));
    }

    match sig.best_lag {
        Some(lag) => out.push_str(&format!(
            "  significant lags: {:?} (first: {lag}) | rho: {}\n",
            sig.lags,
            fmt_vec(&sig.rho_values)
        )),
        None => out.push_str("  significant lags: none\n"),
    }
    out
}

pub fn format_performance(perf: &PerformanceComparison, order: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Unsmoothing (order {order}):\n"));
    out.push_str(&format!(
        "  {:<12} {:>12} {:>12} {:>6}\n",
        "", "ann. return", "ann. vol", "n"
    ));
    for (label, stats) in [("reported", &perf.reported), ("unsmoothed", &perf.unsmoothed)] {
        out.push_str(&format!(
            "  {:<12} {:>12} {:>12} {:>6}\n",
            label,
            fmt_pct(stats.annualized_return),
            fmt_pct(stats.annualized_volatility),
            stats.n_periods
        ));
    }
    out.push_str(&format!("  volatility ratio: {:.2}x\n", perf.volatility_ratio()));
    out
}

/// Format the synthetic-sample recovery block.
pub fn format_recovery(sample: &SampleConfig, run: &RunOutput, check: &RecoveryCheck) -> String {
    let mut out = String::new();
    out.push_str("Synthetic recovery:\n");
    out.push_str(&format!(
        "  true rho={} | estimated rho={} | seed={}\n",
        sample.rho,
        fmt_vec(&run.lag_selection.rho_values),
        sample.seed
    ));
    out.push_str(&format!(
        "  true returns: ann. return {} | ann. vol {}\n",
        fmt_pct(check.truth.annualized_return),
        fmt_pct(check.truth.annualized_volatility)
    ));
    out.push_str(&format!(
        "  RMSE vs true returns: {:.6} over {} periods\n",
        check.rmse, check.n_common
    ));
    out
}

fn fmt_pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

fn fmt_interval((lo, hi): (f64, f64)) -> String {
    format!("[{lo:.4}, {hi:.4}]")
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
