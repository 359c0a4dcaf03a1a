//! Series Loader Module
//! Reads the weekly Google Trends exports into named tables using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Column holding the week start date in every table.
pub const WEEK_COL: &str = "week";
/// Year column derived on the merged table.
pub const YEAR_COL: &str = "year";

/// Series names, used as value-column names after loading.
pub const VOLLEYBALL: &str = "Volleyball";
pub const SUPERLIGA: &str = "Superliga";
pub const OLYMPICS: &str = "Olympics";
pub const NATIONS_LEAGUE: &str = "Nations League";

/// Directory the fixed-name exports are read from.
pub const DATA_DIR: &str = "data";

/// One tracked search term and the export file it lives in.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSource {
    pub name: &'static str,
    pub file_name: &'static str,
}

/// The four exports this dashboard is built on. File names are fixed by the
/// data source and kept verbatim.
pub const SERIES_SOURCES: [SeriesSource; 4] = [
    SeriesSource {
        name: VOLLEYBALL,
        file_name: "multiTimeline_Vôlei.csv",
    },
    SeriesSource {
        name: SUPERLIGA,
        file_name: "multiTimeline_Superliga de Vôlei.csv",
    },
    SeriesSource {
        name: OLYMPICS,
        file_name: "multiTimeline_Olimpíadas.csv",
    },
    SeriesSource {
        name: NATIONS_LEAGUE,
        file_name: "multiTimeline_Liga das Nações.csv",
    },
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("{path}: expected 2 columns (week, value), found {found}")]
    UnexpectedShape { path: PathBuf, found: usize },
}

/// Reads raw series exports, one two-column table per search term.
pub struct SeriesLoader;

impl SeriesLoader {
    /// Load one export: skip the category line the exports start with, honor
    /// the header line after it, and rename the two columns positionally to
    /// `week` and the series name.
    ///
    /// A missing file or a malformed table is fatal to the caller; the
    /// pipeline never guesses around bad input.
    pub fn load_series(dir: &Path, source: &SeriesSource) -> Result<DataFrame, LoaderError> {
        let path = dir.join(source.file_name);

        let mut df = LazyCsvReader::new(&path)
            .with_skip_rows(1)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        if df.width() != 2 {
            return Err(LoaderError::UnexpectedShape {
                path,
                found: df.width(),
            });
        }
        df.set_column_names([WEEK_COL, source.name])?;

        debug!(
            file = %path.display(),
            rows = df.height(),
            series = source.name,
            "loaded series export"
        );
        Ok(df)
    }
}
