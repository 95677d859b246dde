//! End-to-end runs through the public API: CSV in, report and exports out.

use unsmooth::analysis::AnalysisError;
use unsmooth::app::pipeline::{recovery_check, run_analysis};
use unsmooth::data::{SampleConfig, generate_sample};
use unsmooth::domain::{AnalysisConfig, Frequency, SeriesInput};
use unsmooth::error::AppError;
use unsmooth::io::{read_returns, write_series};
use unsmooth::report::format_run_report;

fn sample_csv(columns: usize) -> String {
    let samples: Vec<_> = (0..columns)
        .map(|i| {
            generate_sample(&SampleConfig {
                n: 120,
                seed: 100 + i as u64,
                ..SampleConfig::default()
            })
            .unwrap()
        })
        .collect();

    let mut csv = String::from("Date");
    for i in 0..columns {
        csv.push_str(&format!(",fund{i}"));
    }
    csv.push('\n');

    let index = samples[0].smoothed.index();
    for (t, date) in index.iter().enumerate() {
        csv.push_str(&date.format("%Y-%m-%d").to_string());
        for s in &samples {
            csv.push_str(&format!(",{}", s.smoothed.values()[t]));
        }
        csv.push('\n');
    }
    csv
}

#[test]
fn csv_to_report_and_export() {
    let ingest = read_returns(sample_csv(1).as_bytes(), Frequency::Monthly).unwrap();
    assert_eq!(ingest.rows_used, 120);

    let config = AnalysisConfig {
        max_lag: 6,
        ..AnalysisConfig::default()
    };
    let run = run_analysis(&ingest.table, &config).unwrap();
    assert_eq!(run.reported.name(), "fund0");
    assert_eq!(
        run.unsmoothed.len(),
        run.reported.len() - run.lag_selection.best_lag
    );
    assert!(run.performance.volatility_ratio() > 1.0);

    let report = format_run_report(&run, &config);
    assert!(report.contains("Series: fund0"));

    let mut out = Vec::new();
    write_series(&mut out, &run.reported, &run.unsmoothed).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 121);
}

#[test]
fn multi_column_table_needs_a_column_choice() {
    let ingest = read_returns(sample_csv(2).as_bytes(), Frequency::Monthly).unwrap();

    let err = run_analysis(&ingest.table, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(err, AnalysisError::Shape { columns: 2 });
    assert_eq!(AppError::from(err).exit_code(), 2);

    let series = ingest.table.column("FUND1").unwrap();
    assert!(series.as_series().is_ok());
    assert!(run_analysis(&series, &AnalysisConfig::default()).is_ok());
}

#[test]
fn unsmoothing_recovers_synthetic_returns() {
    let sample = generate_sample(&SampleConfig {
        n: 480,
        rho: 0.6,
        ..SampleConfig::default()
    })
    .unwrap();
    let config = AnalysisConfig {
        max_lag: 4,
        ..AnalysisConfig::default()
    };
    let run = run_analysis(&sample.smoothed, &config).unwrap();
    let unsmoothed = recovery_check(&sample.raw, &run.unsmoothed).unwrap();
    let reported = recovery_check(&sample.raw, &run.reported).unwrap();

    assert!(unsmoothed.rmse < reported.rmse);
    assert!((run.lag_selection.rho_values[0] - 0.6).abs() < 0.15);
}
