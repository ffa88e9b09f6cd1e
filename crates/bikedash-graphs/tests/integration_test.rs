//! Integration tests for bikedash-graphs crate.
//!
//! These tests load datasets from disk, run the dashboard pipeline and check
//! the filtering and aggregation properties over generated record sets.

use bikedash_common::test_utils::property_testing::{
    daily_records_strategy, hourly_records_strategy, interval_strategy,
};
use bikedash_common::test_utils::record_fixtures::{sample_daily_records, sample_hourly_records};
use bikedash_common::test_utils::{create_temp_dir, csv_fixtures, init_test_logging, ymd};
use bikedash_common::{DashError, DateInterval};
use bikedash_config::{Config, DataConfig, ImageFormat};
use bikedash_graphs::{
    aggregate, by_hour, by_month, by_season, filter_by_interval, summarize, user_type_totals,
    ChartManager, ChartStyle, DashboardPipeline, DataLoader, PipelineOptions, RecordStore,
    SNAPSHOT_FILE_NAME,
};
use proptest::prelude::*;

fn data_config(dir: &std::path::Path) -> DataConfig {
    let (daily_path, hourly_path) =
        csv_fixtures::write_dataset(dir, &sample_daily_records(), &sample_hourly_records());
    DataConfig {
        daily_path,
        hourly_path,
        verify_totals: true,
    }
}

#[test]
fn test_load_and_compute_from_files() {
    init_test_logging();
    let dir = create_temp_dir();
    let store = DataLoader::default()
        .load_store(&data_config(dir.path()))
        .unwrap();

    assert_eq!(store.daily(), sample_daily_records().as_slice());
    assert_eq!(store.hourly(), sample_hourly_records().as_slice());

    let interval = DateInterval::new(ymd(2011, 1, 1), ymd(2011, 12, 31)).unwrap();
    let snapshot = DashboardPipeline::new(&store, PipelineOptions::default())
        .compute(interval)
        .unwrap();

    assert_eq!(snapshot.selected_days(), 4);
    assert_eq!(snapshot.summary.grand_total, 11_586);
    assert_eq!(snapshot.by_hour, by_hour(&sample_hourly_records()));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let config = DataConfig {
        daily_path: dir.path().join("absent.csv"),
        hourly_path: dir.path().join("absent-hourly.csv"),
        verify_totals: true,
    };
    let err = DataLoader::default().load_store(&config).unwrap_err();
    assert!(matches!(err, DashError::Io(_)));
}

#[test]
fn test_missing_column_in_file_names_file() {
    let dir = create_temp_dir();
    let mut config = data_config(dir.path());
    config.hourly_path = dir.path().join("hourly-broken.csv");
    std::fs::write(&config.hourly_path, "dteday,hr\n2011-01-01,0\n").unwrap();

    let err = DataLoader::default().load_store(&config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required column 'cnt' in hourly-broken.csv"
    );
}

#[test]
fn test_snapshot_only_output() {
    let dir = create_temp_dir();
    let store = RecordStore::new(sample_daily_records(), sample_hourly_records());
    let snapshot = DashboardPipeline::new(&store, PipelineOptions::default())
        .compute_full_range()
        .unwrap();

    let manager = ChartManager::new(Vec::new(), ChartStyle::default(), dir.path(), true);
    let written = manager.render_all(&snapshot).unwrap();
    assert_eq!(written, vec![dir.path().join(SNAPSHOT_FILE_NAME)]);
}

#[test]
#[ignore = "needs system fonts for text rendering"]
fn test_render_every_chart_to_svg_and_png() {
    let dir = create_temp_dir();
    let store = RecordStore::new(sample_daily_records(), sample_hourly_records());
    let snapshot = DashboardPipeline::new(&store, PipelineOptions::default())
        .compute_full_range()
        .unwrap();

    for format in [ImageFormat::Svg, ImageFormat::Png] {
        let mut config = Config::default();
        config.output.directory = dir.path().join(format.extension());
        config.output.format = format;
        config.charts.enabled.daily_rentals = true;
        config.charts.enabled.rentals_by_year = true;
        config.charts.enabled.user_types = true;

        let written = ChartManager::from_config(&config)
            .render_all(&snapshot)
            .unwrap();
        assert_eq!(written.len(), 6);
        for path in written {
            assert!(std::fs::metadata(&path).unwrap().len() > 0, "{}", path.display());
        }
    }
}

proptest! {
    #[test]
    fn prop_filter_is_sound_and_complete(
        records in daily_records_strategy(80),
        interval in interval_strategy(),
    ) {
        let selected = filter_by_interval(&records, &interval);
        prop_assert!(selected.iter().all(|r| interval.contains(r.date)));

        let expected: Vec<_> = records.iter().filter(|r| interval.contains(r.date)).copied().collect();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_grouping_conserves_totals(
        records in daily_records_strategy(80),
        hourly in hourly_records_strategy(120),
    ) {
        let total: u64 = records.iter().map(|r| u64::from(r.total)).sum();
        prop_assert_eq!(by_month(&records).iter().map(|r| r.total).sum::<u64>(), total);
        prop_assert_eq!(by_season(&records).iter().map(|r| r.total).sum::<u64>(), total);

        let by_weekday = aggregate(&records, |r| r.date.format("%u").to_string(), |r| u64::from(r.total));
        prop_assert_eq!(by_weekday.iter().map(|r| r.total).sum::<u64>(), total);

        let hourly_total: u64 = hourly.iter().map(|r| u64::from(r.total)).sum();
        prop_assert_eq!(by_hour(&hourly).iter().map(|r| r.total).sum::<u64>(), hourly_total);
    }

    #[test]
    fn prop_summary_invariant(records in daily_records_strategy(80)) {
        let metrics = summarize(&records);
        prop_assert_eq!(metrics.casual_total + metrics.registered_total, metrics.grand_total);

        let users = user_type_totals(&records);
        prop_assert_eq!(users[0].total, metrics.casual_total);
        prop_assert_eq!(users[1].total, metrics.registered_total);
    }

    #[test]
    fn prop_recompute_is_idempotent(
        records in daily_records_strategy(60),
        hourly in hourly_records_strategy(60),
        interval in interval_strategy(),
    ) {
        let store = RecordStore::new(records, hourly);
        let pipeline = DashboardPipeline::new(&store, PipelineOptions::default());
        let first = pipeline.compute(interval).unwrap();
        let second = pipeline.compute(interval).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_full_bounds_select_all(records in daily_records_strategy(60)) {
        let store = RecordStore::new(records.clone(), Vec::new());
        if let Some(bounds) = store.bounds() {
            prop_assert_eq!(store.select(&bounds), records.clone());
            for record in &records {
                let single = filter_by_interval(&records, &DateInterval::single_day(record.date));
                prop_assert_eq!(single, vec![*record]);
            }
        } else {
            prop_assert!(records.is_empty());
        }
    }
}
