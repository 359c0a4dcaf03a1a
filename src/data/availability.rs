//! Series Availability Module
//! Encodes known gaps in the source exports so the event picker can trim
//! series that have nothing to show for a year.

use super::loader::OLYMPICS;

/// (year, series) pairs with no usable data in the exports. The Olympics
/// export only carries real interest around the Games themselves; years
/// without usable data are listed here instead of being special-cased in
/// the widgets.
const KNOWN_GAPS: &[(i32, &str)] = &[(2023, OLYMPICS), (2025, OLYMPICS)];

/// Lookups against the known-gap table.
pub struct SeriesAvailability;

impl SeriesAvailability {
    /// Whether a series has usable data for the given year.
    pub fn is_available(year: i32, series: &str) -> bool {
        !KNOWN_GAPS
            .iter()
            .any(|(gap_year, gap_series)| *gap_year == year && *gap_series == series)
    }

    /// The series worth offering for a year, input order kept.
    pub fn offered(year: i32, all_series: &[String]) -> Vec<String> {
        all_series
            .iter()
            .filter(|series| Self::is_available(year, series.as_str()))
            .cloned()
            .collect()
    }
}
