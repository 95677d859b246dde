//! Core series types.
//!
//! A `TimeSeries` is the unit every analysis stage consumes: an ordered set of
//! periodic returns on a strictly increasing date index. Lag operations are
//! position based; calendar gaps are kept as they are and never reindexed.
//!
//! Missing observations are represented as `f64::NAN`.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::error::{AnalysisError, Result};
use crate::math::lagged;
use crate::math::stats;

/// Sampling frequency of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Daily => 252,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
        }
    }
}

impl FromStr for Frequency {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "D" | "DAILY" => Ok(Frequency::Daily),
            "M" | "MONTHLY" => Ok(Frequency::Monthly),
            "Q" | "QUARTERLY" => Ok(Frequency::Quarterly),
            _ => Err(AnalysisError::InvalidParameter(
                "Unsupported frequency. Please use 'M', 'D', or 'Q'.".to_string(),
            )),
        }
    }
}

/// A univariate, date-indexed series of periodic returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    frequency: Frequency,
    index: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, validating that the index is strictly increasing and
    /// aligned with the values.
    pub fn new(
        name: impl Into<String>,
        frequency: Frequency,
        index: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self> {
        validate_index(&index, values.len()).map_err(AnalysisError::InvalidIndex)?;
        Ok(Self {
            name: name.into(),
            frequency,
            index,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of the series without its missing (non-finite) observations.
    pub fn dropna(&self) -> TimeSeries {
        let (index, values) = self
            .index
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| v.is_finite())
            .map(|(d, v)| (*d, *v))
            .unzip();

        TimeSeries {
            name: self.name.clone(),
            frequency: self.frequency,
            index,
            values,
        }
    }

    /// Values delayed by `k` positions; the first `k` entries are missing.
    pub fn shift(&self, k: usize) -> Vec<f64> {
        lagged::shift(&self.values, k)
    }

    /// Mean of the non-missing observations.
    pub fn mean(&self) -> f64 {
        stats::mean(&stats::finite(&self.values))
    }

    /// Sample standard deviation (ddof = 1) of the non-missing observations.
    pub fn std(&self) -> f64 {
        stats::sample_std(&stats::finite(&self.values))
    }
}

/// Several return columns sharing one date index (e.g. a parsed CSV file).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnTable {
    frequency: Frequency,
    index: Vec<NaiveDate>,
    columns: Vec<String>,
    data: Vec<Vec<f64>>,
}

impl ReturnTable {
    pub fn new(
        frequency: Frequency,
        index: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        for (name, values) in &columns {
            validate_index(&index, values.len())
                .map_err(|e| AnalysisError::InvalidIndex(format!("column `{name}`: {e}")))?;
        }

        let (columns, data) = columns.into_iter().unzip();
        Ok(Self {
            frequency,
            index,
            columns,
            data,
        })
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Extract one column by (case-insensitive) name.
    pub fn column(&self, name: &str) -> Result<TimeSeries> {
        let pos = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))?;

        TimeSeries::new(
            self.columns[pos].clone(),
            self.frequency,
            self.index.clone(),
            self.data[pos].clone(),
        )
    }

    /// The table as a series; requires exactly one data column.
    pub fn single_series(&self) -> Result<TimeSeries> {
        if self.columns.len() != 1 {
            return Err(AnalysisError::Shape {
                columns: self.columns.len(),
            });
        }
        TimeSeries::new(
            self.columns[0].clone(),
            self.frequency,
            self.index.clone(),
            self.data[0].clone(),
        )
    }
}

/// Anything that can be normalised into a single return series.
pub trait SeriesInput {
    fn as_series(&self) -> Result<Cow<'_, TimeSeries>>;
}

impl SeriesInput for TimeSeries {
    fn as_series(&self) -> Result<Cow<'_, TimeSeries>> {
        Ok(Cow::Borrowed(self))
    }
}

impl SeriesInput for ReturnTable {
    fn as_series(&self) -> Result<Cow<'_, TimeSeries>> {
        self.single_series().map(Cow::Owned)
    }
}

fn validate_index(index: &[NaiveDate], n_values: usize) -> std::result::Result<(), String> {
    if index.len() != n_values {
        return Err(format!(
            "index has {} entries but there are {} values",
            index.len(),
            n_values
        ));
    }

    if let Some(pos) = index.windows(2).position(|w| w[1] <= w[0]) {
        let (prev, next) = (index[pos], index[pos + 1]);
        let what = if prev == next { "duplicate timestamp" } else { "out-of-order timestamp" };
        return Err(format!("{what} at position {}: {next} follows {prev}", pos + 1));
    }

    Ok(())
}
