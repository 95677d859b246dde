//! CSV ingest of periodic return tables.
//!
//! Expected layout: a date-like first column (the time index) followed by one
//! or more numeric return columns, with a header row.
//!
//! Design goals:
//! - **Strict index**: unparseable dates are row errors; the resulting index must
//!   be strictly increasing (no silent sorting or reindexing)
//! - **Lenient values**: empty / `NA` / `NaN` cells become missing observations
//! - **Separation of concerns**: no analysis logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use log::warn;

use crate::domain::{Frequency, ReturnTable};
use crate::error::AppError;

/// Date formats tried in order for the index column.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d", "%Y%m%d"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the parsed table + row errors.
#[derive(Debug, Clone)]
pub struct IngestedReturns {
    pub table: ReturnTable,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a return table from a CSV file.
pub fn load_returns(path: &Path, frequency: Frequency) -> Result<IngestedReturns, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_returns(file, frequency)
}

/// Parse a return table from any CSV reader.
pub fn read_returns<R: Read>(source: R, frequency: Frequency) -> Result<IngestedReturns, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let columns = value_columns(&headers)?;

    let mut index = Vec::new();
    let mut data: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, columns.len()) {
            Ok((date, values)) => {
                index.push(date);
                for (col, v) in data.iter_mut().zip(values) {
                    col.push(v);
                }
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for e in &row_errors {
        warn!("line {}: {}", e.line, e.message);
    }

    let rows_used = index.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows found in CSV."));
    }

    let table = ReturnTable::new(frequency, index, columns.into_iter().zip(data).collect())?;

    Ok(IngestedReturns {
        table,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn value_columns(headers: &StringRecord) -> Result<Vec<String>, AppError> {
    let columns: Vec<String> = headers
        .iter()
        .skip(1)
        .map(normalize_header_name)
        .collect();

    if columns.is_empty() {
        return Err(AppError::new(
            2,
            "CSV needs a date column followed by at least one return column.",
        ));
    }
    if let Some(empty) = columns.iter().position(String::is_empty) {
        return Err(AppError::new(2, format!("Column {} has an empty header.", empty + 2)));
    }

    Ok(columns)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so column lookups work.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord, n_columns: usize) -> Result<(NaiveDate, Vec<f64>), String> {
    let raw_date = record.get(0).ok_or_else(|| "Missing date value.".to_string())?;
    let date = parse_date(raw_date)?;

    let mut values = Vec::with_capacity(n_columns);
    for col in 0..n_columns {
        let cell = record.get(col + 1).unwrap_or("");
        values.push(parse_value(cell).map_err(|e| format!("column {}: {e}", col + 2))?);
    }

    Ok((date, values))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Timestamps such as `2024-01-31 00:00:00` keep only the date part.
    let s = s.trim().split([' ', 'T']).next().unwrap_or("");

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("Invalid date: '{s}'"))
}

fn parse_value(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }

    // Allow percent-formatted cells such as `1.25%`.
    if let Some(pct) = s.strip_suffix('%') {
        return pct
            .trim()
            .parse::<f64>()
            .map(|v| v / 100.0)
            .map_err(|_| format!("Invalid number: '{s}'"));
    }

    s.parse::<f64>().map_err(|_| format!("Invalid number: '{s}'"))
}
