//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - loads return CSVs or generates synthetic samples
//! - runs the analysis pipeline
//! - prints reports and writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{AnalysisArgs, AnalyzeArgs, Command, SimulateArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{AnalysisConfig, Verbosity};
use crate::error::AppError;
use crate::io::ingest::load_returns;

pub mod pipeline;

/// Environment variable overriding the log filter (`env_logger` syntax).
pub const LOG_ENV: &str = "UNSMOOTH_LOG";

/// Entry point for the `unsmooth` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `unsmooth fund.csv` behaves like `unsmooth analyze fund.csv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Simulate(args) => handle_simulate(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.analysis);
    init_logging(config.verbosity);
    config.validate()?;

    let ingest = load_returns(&args.csv, config.frequency)?;
    info!(
        "loaded {} of {} rows from {}",
        ingest.rows_used,
        ingest.rows_read,
        args.csv.display()
    );

    let run = match &args.column {
        Some(name) => pipeline::run_analysis(&ingest.table.column(name)?, &config)?,
        None => pipeline::run_analysis(&ingest.table, &config)?,
    };

    println!("{}", crate::report::format_ingest_summary(&ingest, &args.csv));
    println!("{}", crate::report::format_run_report(&run, &config));

    write_exports(&args.analysis, &run, &config)
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.analysis);
    init_logging(config.verbosity);
    config.validate()?;

    let sample = generate_sample(&SampleConfig {
        n: args.n,
        frequency: config.frequency,
        rho: args.rho,
        mean: args.mean,
        sigma: args.sigma,
        seed: args.seed,
        ..SampleConfig::default()
    })?;
    info!("generated {} smoothed observations (rho = {})", args.n, args.rho);

    let run = pipeline::run_analysis(&sample.smoothed, &config)?;
    let recovery = pipeline::recovery_check(&sample.raw, &run.unsmoothed)?;

    println!("{}", crate::report::format_run_report(&run, &config));
    println!(
        "{}",
        crate::report::format_recovery(&sample.config, &run, &recovery)
    );

    write_exports(&args.analysis, &run, &config)
}

fn write_exports(args: &AnalysisArgs, run: &pipeline::RunOutput, config: &AnalysisConfig) -> Result<(), AppError> {
    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &run.reported, &run.unsmoothed)?;
        info!("wrote series to {}", path.display());
    }
    if let Some(path) = &args.export_summary {
        crate::io::summary::write_summary_json(path, run, config)?;
        info!("wrote summary to {}", path.display());
    }
    Ok(())
}

pub fn config_from_args(args: &AnalysisArgs) -> AnalysisConfig {
    AnalysisConfig {
        max_lag: args.max_lag,
        nlags: args.nlags,
        alpha: args.alpha,
        frequency: args.frequency,
        verbosity: Verbosity::from_flags(args.quiet, args.verbose),
    }
}

/// Install the global logger. `UNSMOOTH_LOG` overrides the flag-derived level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbosity: Verbosity) {
    let _ = env_logger::Builder::new()
        .filter_level(verbosity.level_filter())
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .try_init();
}

/// Rewrite argv so a bare CSV path means `analyze`.
///
/// Rules:
/// - `unsmooth`                      -> unchanged (clap prints usage)
/// - `unsmooth fund.csv ...`         -> `unsmooth analyze fund.csv ...`
/// - `unsmooth -v fund.csv`          -> `unsmooth analyze -v fund.csv`
/// - `unsmooth --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "simulate");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_path_becomes_analyze() {
        assert_eq!(
            rewrite_args(argv(&["unsmooth", "fund.csv"])),
            argv(&["unsmooth", "analyze", "fund.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["unsmooth", "-v", "fund.csv"])),
            argv(&["unsmooth", "analyze", "-v", "fund.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for parts in [
            &["unsmooth"][..],
            &["unsmooth", "--help"],
            &["unsmooth", "simulate", "-n", "60"],
            &["unsmooth", "analyze", "x.csv"],
        ] {
            assert_eq!(rewrite_args(argv(parts)), argv(parts));
        }
    }

    #[test]
    fn config_mirrors_flags() {
        let cli = crate::cli::Cli::parse_from(["unsmooth", "analyze", "x.csv", "--max-lag", "6", "-q"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = config_from_args(&args.analysis);
        assert_eq!(config.max_lag, 6);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert!(config.validate().is_ok());
    }
}
