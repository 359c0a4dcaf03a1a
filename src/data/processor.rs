//! Trend Pipeline Module
//! Normalizes, filters and merges the loaded series tables.

use chrono::NaiveDate;
use polars::prelude::*;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

use super::loader::{LoaderError, SeriesLoader, SERIES_SOURCES, WEEK_COL, YEAR_COL};

/// Weeks before this date are discarded from every series.
pub const CUTOFF_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2022, 1, 1) {
    Some(date) => date,
    None => panic!("invalid cutoff date"),
};

/// Date format carried by the weekly exports. Pinned so locale defaults can
/// never re-interpret the dates.
pub const WEEK_FORMAT: &str = "%Y-%m-%d";

/// Placeholder the exports use for below-threshold interest.
pub const SENTINEL: &str = "<1";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("No series tables to merge")]
    NoSeries,
}

/// Builds the merged weekly table out of the raw series exports.
pub struct TrendPipeline;

impl TrendPipeline {
    /// Parse the week column with the pinned format, map sentinel cells to 0
    /// and cast the value column to integers. The sentinel mapping matches
    /// whole cells only and must happen before the cast, which stays strict:
    /// stray non-numeric text fails the run instead of turning into a silent
    /// null.
    pub fn normalize(df: DataFrame, series: &str) -> Result<DataFrame, ProcessorError> {
        let value_text = col(series).cast(DataType::String);
        let out = df
            .lazy()
            .with_columns([
                col(WEEK_COL).cast(DataType::String).str().to_date(StrptimeOptions {
                    format: Some(WEEK_FORMAT.into()),
                    strict: true,
                    exact: true,
                    cache: false,
                }),
                when(value_text.clone().eq(lit(SENTINEL)))
                    .then(lit("0"))
                    .otherwise(value_text)
                    .strict_cast(DataType::Int64)
                    .alias(series),
            ])
            .collect()?;
        Ok(out)
    }

    /// Drop rows before the fixed cutoff. Applied per table, so each series
    /// may keep a different earliest week.
    pub fn apply_cutoff(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let out = df
            .lazy()
            .filter(col(WEEK_COL).gt_eq(lit(CUTOFF_DATE)))
            .collect()?;
        Ok(out)
    }

    /// Merge the filtered tables left to right with full outer joins on the
    /// week key (union of weeks, not intersection), sort by week, fill the
    /// join gaps with zero, cast values back to integers and derive the year
    /// column. The fill must precede the cast: join gaps start out as nulls.
    pub fn merge(tables: Vec<DataFrame>) -> Result<DataFrame, ProcessorError> {
        let mut tables = tables.into_iter();
        let first = tables.next().ok_or(ProcessorError::NoSeries)?;

        let mut merged = first.lazy();
        for table in tables {
            merged = merged.join(
                table.lazy(),
                [col(WEEK_COL)],
                [col(WEEK_COL)],
                JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
            );
        }

        let out = merged
            .sort([WEEK_COL], Default::default())
            .with_columns([col("*")
                .exclude([WEEK_COL])
                .fill_null(lit(0))
                .cast(DataType::Int64)])
            .with_columns([col(WEEK_COL).dt().year().alias(YEAR_COL)])
            .collect()?;
        Ok(out)
    }

    /// Load → normalize → filter every export (in parallel, source order
    /// kept) and merge the results. The single data-preparation entry point,
    /// invoked once per run.
    pub fn prepare(data_dir: &Path) -> Result<TrendDataset, ProcessorError> {
        let started = Instant::now();

        let tables = SERIES_SOURCES
            .par_iter()
            .map(|source| {
                let raw = SeriesLoader::load_series(data_dir, source)?;
                let parsed = Self::normalize(raw, source.name)?;
                Self::apply_cutoff(parsed)
            })
            .collect::<Result<Vec<_>, ProcessorError>>()?;

        let merged = Self::merge(tables)?;
        info!(
            weeks = merged.height(),
            series = SERIES_SOURCES.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trend dataset ready"
        );
        Ok(TrendDataset::new(merged))
    }
}

/// The merged weekly table: one row per week in the union of the series,
/// one integer column per series, plus the derived year.
#[derive(Debug, Clone)]
pub struct TrendDataset {
    df: DataFrame,
}

impl TrendDataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Number of weeks in the table.
    pub fn week_count(&self) -> usize {
        self.df.height()
    }

    /// Distinct years present, sorted ascending.
    pub fn years(&self) -> Vec<i32> {
        let Ok(column) = self.df.column(YEAR_COL) else {
            return Vec::new();
        };
        let Ok(years) = column.i32() else {
            return Vec::new();
        };
        let mut years: Vec<i32> = years.into_iter().flatten().collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Series columns in table order (everything but week and year).
    pub fn series_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .filter(|name| name != WEEK_COL && name != YEAR_COL)
            .collect()
    }

    /// Rows belonging to one calendar year.
    pub fn year_slice(&self, year: i32) -> Result<DataFrame, ProcessorError> {
        let out = self
            .df
            .clone()
            .lazy()
            .filter(col(YEAR_COL).eq(lit(year)))
            .collect()?;
        Ok(out)
    }
}
