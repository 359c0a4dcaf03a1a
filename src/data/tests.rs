//! Unit tests for export loading and the merge pipeline

use super::*;

#[cfg(test)]
mod loader_tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: SeriesSource = SeriesSource {
        name: "Volleyball",
        file_name: "volleyball.csv",
    };

    fn write_export(dir: &TempDir, file_name: &str, rows: &str) {
        let content = format!("Category: All categories\nWeek,interest\n{rows}");
        fs::write(dir.path().join(file_name), content).unwrap();
    }

    #[test]
    fn test_load_renames_columns_positionally() {
        let dir = TempDir::new().unwrap();
        write_export(&dir, "volleyball.csv", "2022-01-02,37\n2022-01-09,41\n");

        let df = SeriesLoader::load_series(dir.path(), &SOURCE).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, [WEEK_COL, "Volleyball"]);
    }

    #[test]
    fn test_missing_export_is_an_error() {
        let dir = TempDir::new().unwrap();

        let result = SeriesLoader::load_series(dir.path(), &SOURCE);
        assert!(matches!(result, Err(LoaderError::Csv(_))));
    }

    #[test]
    fn test_unexpected_column_count_is_rejected() {
        let dir = TempDir::new().unwrap();
        let content = "Category: All categories\nWeek,a,b\n2022-01-02,1,2\n";
        fs::write(dir.path().join("volleyball.csv"), content).unwrap();

        let result = SeriesLoader::load_series(dir.path(), &SOURCE);
        assert!(matches!(
            result,
            Err(LoaderError::UnexpectedShape { found: 3, .. })
        ));
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weeks_of(df: &DataFrame) -> Vec<NaiveDate> {
        df.column(WEEK_COL)
            .unwrap()
            .date()
            .unwrap()
            .as_date_iter()
            .flatten()
            .collect()
    }

    fn values_of(df: &DataFrame, series: &str) -> Vec<i64> {
        df.column(series)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_normalize_parses_weeks_and_maps_sentinel_to_zero() {
        let df = df!(
            WEEK_COL => ["2022-01-02", "2022-01-09"],
            "Olympics" => ["<1", "64"],
        )
        .unwrap();

        let out = TrendPipeline::normalize(df, "Olympics").unwrap();

        assert_eq!(out.column(WEEK_COL).unwrap().dtype(), &DataType::Date);
        assert_eq!(values_of(&out, "Olympics"), vec![0, 64]);
    }

    #[test]
    fn test_normalize_rejects_garbage_values() {
        let df = df!(
            WEEK_COL => ["2022-01-02", "2022-01-09"],
            "Olympics" => ["abc", "3"],
        )
        .unwrap();

        assert!(TrendPipeline::normalize(df, "Olympics").is_err());
    }

    #[test]
    fn test_normalize_rejects_partial_sentinel_matches() {
        // Cells that merely contain the token stay non-numeric and fail
        let df = df!(
            WEEK_COL => ["2022-01-02", "2022-01-09"],
            "Olympics" => ["1<1", "<11"],
        )
        .unwrap();

        assert!(TrendPipeline::normalize(df, "Olympics").is_err());
    }

    #[test]
    fn test_normalize_rejects_unparseable_weeks() {
        let df = df!(
            WEEK_COL => ["02/01/2022"],
            "Volleyball" => ["9"],
        )
        .unwrap();

        assert!(TrendPipeline::normalize(df, "Volleyball").is_err());
    }

    #[test]
    fn test_cutoff_keeps_boundary_and_drops_earlier_weeks() {
        let df = df!(
            WEEK_COL => ["2021-12-26", "2022-01-01", "2022-01-02"],
            "Volleyball" => ["5", "6", "7"],
        )
        .unwrap();

        let out = TrendPipeline::apply_cutoff(
            TrendPipeline::normalize(df, "Volleyball").unwrap(),
        )
        .unwrap();

        assert_eq!(weeks_of(&out), vec![date(2022, 1, 1), date(2022, 1, 2)]);
        assert_eq!(values_of(&out, "Volleyball"), vec![6, 7]);
    }

    #[test]
    fn test_merge_unions_weeks_and_fills_gaps_with_zero() {
        let a = df!(
            WEEK_COL => ["2022-01-03", "2022-01-10"],
            "A" => ["5", "3"],
        )
        .unwrap();
        let b = df!(
            WEEK_COL => ["2022-01-10"],
            "B" => ["7"],
        )
        .unwrap();

        let merged = TrendPipeline::merge(vec![
            TrendPipeline::normalize(a, "A").unwrap(),
            TrendPipeline::normalize(b, "B").unwrap(),
        ])
        .unwrap();

        assert_eq!(weeks_of(&merged), vec![date(2022, 1, 3), date(2022, 1, 10)]);
        assert_eq!(values_of(&merged, "A"), vec![5, 3]);
        assert_eq!(values_of(&merged, "B"), vec![0, 7]);

        let years: Vec<i32> = merged
            .column(YEAR_COL)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(years, vec![2022, 2022]);
    }

    #[test]
    fn test_merge_requires_at_least_one_table() {
        assert!(matches!(
            TrendPipeline::merge(Vec::new()),
            Err(ProcessorError::NoSeries)
        ));
    }

    #[test]
    fn test_dataset_reports_sorted_years_and_series() {
        let a = df!(
            WEEK_COL => ["2023-01-01", "2022-01-02"],
            "A" => ["1", "2"],
        )
        .unwrap();
        let b = df!(
            WEEK_COL => ["2022-01-02"],
            "B" => ["4"],
        )
        .unwrap();

        let dataset = TrendDataset::new(
            TrendPipeline::merge(vec![
                TrendPipeline::normalize(a, "A").unwrap(),
                TrendPipeline::normalize(b, "B").unwrap(),
            ])
            .unwrap(),
        );

        assert_eq!(dataset.years(), vec![2022, 2023]);
        assert_eq!(dataset.series_names(), ["A", "B"]);
        assert_eq!(dataset.week_count(), 2);

        let slice = dataset.year_slice(2023).unwrap();
        assert_eq!(values_of(&slice, "A"), vec![1]);
        assert_eq!(values_of(&slice, "B"), vec![0]);
    }
}

#[cfg(test)]
mod prepare_tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_sources(dir: &TempDir) {
        for source in &SERIES_SOURCES {
            // The Olympics export carries the below-threshold sentinel
            let rows = if source.name == OLYMPICS {
                "2021-12-26,44\n2022-01-02,<1\n2022-01-09,12\n"
            } else {
                "2021-12-26,50\n2022-01-02,37\n2022-01-09,41\n"
            };
            let content = format!("Category: All categories\nWeek,{}\n{rows}", source.name);
            fs::write(dir.path().join(source.file_name), content).unwrap();
        }
    }

    #[test]
    fn test_prepare_builds_the_merged_dataset() {
        let dir = TempDir::new().unwrap();
        write_sources(&dir);

        let dataset = TrendPipeline::prepare(dir.path()).unwrap();

        assert_eq!(dataset.week_count(), 2);
        assert_eq!(dataset.years(), vec![2022]);
        assert_eq!(
            dataset.series_names(),
            [VOLLEYBALL, SUPERLIGA, OLYMPICS, NATIONS_LEAGUE]
        );

        let slice = dataset.year_slice(2022).unwrap();
        let olympics: Vec<i64> = slice
            .column(OLYMPICS)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(olympics, vec![0, 12]);
    }

    #[test]
    fn test_prepare_fails_when_an_export_is_missing() {
        let dir = TempDir::new().unwrap();

        assert!(TrendPipeline::prepare(dir.path()).is_err());
    }
}

#[cfg(test)]
mod availability_tests {
    use super::*;

    fn all_series() -> Vec<String> {
        [VOLLEYBALL, SUPERLIGA, OLYMPICS, NATIONS_LEAGUE]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_olympics_gap_years() {
        assert!(!SeriesAvailability::is_available(2023, OLYMPICS));
        assert!(!SeriesAvailability::is_available(2025, OLYMPICS));
        assert!(SeriesAvailability::is_available(2024, OLYMPICS));
        assert!(SeriesAvailability::is_available(2023, VOLLEYBALL));
    }

    #[test]
    fn test_offered_trims_only_gap_series() {
        let offered = SeriesAvailability::offered(2023, &all_series());
        assert_eq!(offered, [VOLLEYBALL, SUPERLIGA, NATIONS_LEAGUE]);

        let offered = SeriesAvailability::offered(2022, &all_series());
        assert_eq!(offered, all_series());
    }
}
