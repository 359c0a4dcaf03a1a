//! Data module - export loading and the merge pipeline

mod availability;
mod loader;
mod processor;

#[cfg(test)]
mod tests;

pub use availability::SeriesAvailability;
pub use loader::{
    LoaderError, SeriesLoader, SeriesSource, DATA_DIR, NATIONS_LEAGUE, OLYMPICS, SERIES_SOURCES,
    SUPERLIGA, VOLLEYBALL, WEEK_COL, YEAR_COL,
};
pub use processor::{ProcessorError, TrendDataset, TrendPipeline, CUTOFF_DATE, SENTINEL};
