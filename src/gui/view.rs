//! Dashboard View Module
//! Per-interaction view state derived from the merged dataset.

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

use crate::charts::ChartData;
use crate::data::{ProcessorError, TrendDataset, WEEK_COL};
use crate::stats::CorrelationMatrix;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// View state for the current year and selection.
#[derive(Debug, Clone)]
pub enum DashboardView {
    /// The chosen year has no rows at all.
    Empty { year: i32 },
    /// Data available for the chosen year.
    Ready(ChartData),
}

impl DashboardView {
    /// Build the view for one year and one set of selected series. Derived
    /// from the dataset on every interaction, never mutated in place, so a
    /// stale chart can never outlive the selection that produced it.
    pub fn build(
        dataset: &TrendDataset,
        year: i32,
        selection: &[String],
    ) -> Result<Self, ViewError> {
        let slice = dataset.year_slice(year)?;
        if slice.height() == 0 {
            return Ok(Self::Empty { year });
        }

        let weeks: Vec<NaiveDate> = slice
            .column(WEEK_COL)?
            .date()?
            .as_date_iter()
            .flatten()
            .collect();

        let mut values: Vec<Vec<i64>> = Vec::with_capacity(selection.len());
        for name in selection {
            let column = slice.column(name)?.i64()?.into_iter().flatten().collect();
            values.push(column);
        }

        let float_columns: Vec<Vec<f64>> = values
            .iter()
            .map(|column| column.iter().map(|&v| v as f64).collect())
            .collect();
        let correlation = CorrelationMatrix::compute(selection, &float_columns);

        Ok(Self::Ready(ChartData {
            year,
            series: selection.to_vec(),
            weeks,
            values,
            correlation,
        }))
    }
}
