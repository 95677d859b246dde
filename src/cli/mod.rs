//! Command-line parsing for the return unsmoother.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_ALPHA, DEFAULT_MAX_LAG, DEFAULT_NLAGS, Frequency};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "unsmooth",
    version,
    about = "Unsmooth appraisal-based returns (Geltner / Okunev-White)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyse a CSV of periodic returns: stationarity, lag selection,
    /// correlogram, unsmoothing and before/after performance.
    Analyze(AnalyzeArgs),
    /// Generate a smoothed synthetic series, run the same analysis on it and
    /// report how well the true returns are recovered.
    Simulate(SimulateArgs),
}

/// Options shared by every analysis run.
#[derive(Debug, Args, Clone)]
pub struct AnalysisArgs {
    /// Observation frequency of the returns: D (daily), M (monthly) or Q (quarterly).
    #[arg(short = 'f', long, default_value = "M")]
    pub frequency: Frequency,

    /// Largest AR order tried by the BIC lag search.
    #[arg(long, default_value_t = DEFAULT_MAX_LAG)]
    pub max_lag: usize,

    /// Number of correlogram lags.
    #[arg(long, default_value_t = DEFAULT_NLAGS)]
    pub nlags: usize,

    /// Significance level for the correlogram confidence intervals.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Export reported and unsmoothed returns to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run summary to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// CSV file: date column first, then one or more return columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Return column to analyse (required when the file has several).
    #[arg(short = 'c', long)]
    pub column: Option<String>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Number of observations at the chosen frequency.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub n: usize,

    /// Smoothing coefficient applied to the true returns.
    #[arg(long, default_value_t = 0.4)]
    pub rho: f64,

    /// Per-period mean of the true returns.
    #[arg(long, default_value_t = 0.005)]
    pub mean: f64,

    /// Per-period volatility of the true returns.
    #[arg(long, default_value_t = 0.02)]
    pub sigma: f64,

    /// Random seed for sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["unsmooth", "analyze", "fund.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.csv, PathBuf::from("fund.csv"));
        assert_eq!(args.analysis.max_lag, DEFAULT_MAX_LAG);
        assert_eq!(args.analysis.frequency, Frequency::Monthly);
        assert!(args.column.is_none());
    }

    #[test]
    fn simulate_flags() {
        let cli = Cli::parse_from(["unsmooth", "simulate", "-n", "240", "--rho", "0.6", "-f", "Q", "-vv"]);
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.n, 240);
        assert_eq!(args.rho, 0.6);
        assert_eq!(args.analysis.frequency, Frequency::Quarterly);
        assert_eq!(args.analysis.verbose, 2);
    }

    #[test]
    fn frequency_flag_accepts_names_and_rejects_unknown_codes() {
        let cli = Cli::parse_from(["unsmooth", "analyze", "x.csv", "--frequency", "daily"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.analysis.frequency, Frequency::Daily);

        let err = Cli::try_parse_from(["unsmooth", "analyze", "x.csv", "-f", "W"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported frequency"));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["unsmooth", "analyze", "x.csv", "-q", "-v"]).is_err());
    }
}
