//! Export the reported and unsmoothed series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Rows follow the reported index; positions dropped by unsmoothing have an
//! empty `unsmoothed` cell.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::TimeSeries;
use crate::error::AppError;

/// Write `date,reported,unsmoothed` rows to a CSV file.
pub fn write_series_csv(path: &Path, reported: &TimeSeries, unsmoothed: &TimeSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(file, reported, unsmoothed)
}

pub fn write_series<W: Write>(mut out: W, reported: &TimeSeries, unsmoothed: &TimeSeries) -> Result<(), AppError> {
    writeln!(out, "date,reported,unsmoothed")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let adjusted: HashMap<_, _> = unsmoothed
        .index()
        .iter()
        .zip(unsmoothed.values())
        .map(|(d, v)| (*d, *v))
        .collect();

    for (date, value) in reported.index().iter().zip(reported.values()) {
        writeln!(
            out,
            "{},{},{}",
            date,
            fmt_cell(Some(*value)),
            fmt_cell(adjusted.get(date).copied()),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn fmt_cell(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.10}"),
        _ => String::new(),
    }
}
