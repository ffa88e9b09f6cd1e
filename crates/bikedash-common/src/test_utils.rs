//! Test utilities and shared test helpers for the dashboard crates.
//!
//! This module provides record fixtures, CSV writers, and proptest strategies
//! that can be used across all crates in the workspace for unit and
//! integration testing.

use crate::types::{DailyRecord, HourlyRecord, Season};
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Shorthand for building a calendar date in tests.
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Record fixtures mirroring the public bike-sharing dataset.
pub mod record_fixtures {
    use super::*;

    /// Daily record with the year code and month derived from the date.
    pub fn daily(date: NaiveDate, season: Season, casual: u32, registered: u32) -> DailyRecord {
        use chrono::Datelike;
        let year = u8::try_from(date.year() - 2011).expect("fixture dates start in 2011");
        let month = u8::try_from(date.month()).expect("month fits in u8");
        DailyRecord::from_counts(date, year, season, month, casual, registered)
    }

    /// Hourly record.
    pub const fn hourly(date: NaiveDate, hour: u8, total: u32) -> HourlyRecord {
        HourlyRecord { date, hour, total }
    }

    /// Six daily records spread over two years, three seasons and four months.
    ///
    /// Casual 3,487; registered 13,122; total 16,609.
    pub fn sample_daily_records() -> Vec<DailyRecord> {
        vec![
            daily(ymd(2011, 1, 1), Season::Spring, 331, 654),
            daily(ymd(2011, 1, 2), Season::Spring, 131, 670),
            daily(ymd(2011, 6, 15), Season::Summer, 1000, 4000),
            daily(ymd(2011, 9, 30), Season::Fall, 900, 3900),
            daily(ymd(2012, 1, 1), Season::Spring, 686, 1608),
            daily(ymd(2012, 12, 31), Season::Spring, 439, 2290),
        ]
    }

    /// Eight hourly records; by hour: 0 -> 33, 1 -> 50, 13 -> 220, 23 -> 25.
    pub fn sample_hourly_records() -> Vec<HourlyRecord> {
        vec![
            hourly(ymd(2011, 1, 1), 0, 16),
            hourly(ymd(2011, 1, 1), 1, 40),
            hourly(ymd(2011, 1, 1), 13, 100),
            hourly(ymd(2011, 1, 2), 0, 17),
            hourly(ymd(2011, 1, 2), 13, 120),
            hourly(ymd(2011, 1, 2), 23, 5),
            hourly(ymd(2012, 12, 31), 1, 10),
            hourly(ymd(2012, 12, 31), 23, 20),
        ]
    }
}

/// CSV writers producing files in the public dataset layout.
pub mod csv_fixtures {
    use super::*;
    use std::fmt::Write as _;
    use std::path::{Path, PathBuf};

    /// Header of `day.csv`.
    pub const DAILY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    /// Header of `hour.csv`.
    pub const HOURLY_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    /// Render daily records as CSV text, header included.
    pub fn daily_csv(records: &[DailyRecord]) -> String {
        let mut out = format!("{DAILY_HEADER}\n");
        for (i, r) in records.iter().enumerate() {
            let _ = writeln!(
                out,
                "{},{},{},{},{},0,6,0,2,0.344167,0.363625,0.805833,0.160446,{},{},{}",
                i + 1,
                r.date,
                r.season.code(),
                r.year,
                r.month,
                r.casual,
                r.registered,
                r.total
            );
        }
        out
    }

    /// Render hourly records as CSV text, header included.
    pub fn hourly_csv(records: &[HourlyRecord]) -> String {
        let mut out = format!("{HOURLY_HEADER}\n");
        for (i, r) in records.iter().enumerate() {
            let _ = writeln!(
                out,
                "{},{},1,0,1,{},0,6,0,1,0.24,0.2879,0.81,0,3,{},{}",
                i + 1,
                r.date,
                r.hour,
                r.total.saturating_sub(3),
                r.total
            );
        }
        out
    }

    /// Write `day.csv` and `hour.csv` into `dir`, returning both paths.
    pub fn write_dataset(
        dir: &Path,
        daily: &[DailyRecord],
        hourly: &[HourlyRecord],
    ) -> (PathBuf, PathBuf) {
        let daily_path = dir.join("day.csv");
        let hourly_path = dir.join("hour.csv");
        std::fs::write(&daily_path, daily_csv(daily)).expect("write day.csv");
        std::fs::write(&hourly_path, hourly_csv(hourly)).expect("write hour.csv");
        (daily_path, hourly_path)
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub const fn minimal_config_yaml() -> &'static str {
        r#"
data:
  daily_path: "data/day.csv"
  hourly_path: "data/hour.csv"
"#
    }

    /// Create a full test configuration as YAML string.
    pub const fn full_config_yaml() -> &'static str {
        concat!(
            "data:\n",
            "  daily_path: \"data/day.csv\"\n",
            "  hourly_path: \"data/hour.csv\"\n",
            "  verify_totals: false\n",
            "\n",
            "dashboard:\n",
            "  title: \"City Bike Rentals\"\n",
            "  footer: \"Created by the data team\"\n",
            "  require_rows: true\n",
            "\n",
            "output:\n",
            "  directory: \"out\"\n",
            "  format: \"svg\"\n",
            "  write_snapshot: true\n",
            "\n",
            "charts:\n",
            "  enabled:\n",
            "    daily_rentals: true\n",
            "    rentals_by_year: true\n",
            "    rentals_by_season: true\n",
            "    rentals_by_month: true\n",
            "    rentals_by_hour: true\n",
            "    user_types: true\n",
            "  styling:\n",
            "    width: 1200\n",
            "    height: 700\n",
            "    enable_grid: false\n",
            "    colors:\n",
            "      background: \"#ffffff\"\n",
            "      text: \"#222222\"\n",
            "      line: \"#ffa500\"\n",
            "      palette:\n",
            "        - \"#1f77b4\"\n",
            "        - \"#ff7f0e\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"json\"\n"
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use super::*;
    use crate::types::DateInterval;
    use chrono::{Datelike, Duration};
    use proptest::prelude::*;

    /// First day of every generated dataset.
    pub fn base_date() -> NaiveDate {
        ymd(2011, 1, 1)
    }

    /// Strategy for daily record sets with strictly increasing, gapped dates.
    pub fn daily_records_strategy(max_len: usize) -> impl Strategy<Value = Vec<DailyRecord>> {
        prop::collection::vec(
            (
                1i64..4,
                0u32..5_000,
                0u32..10_000,
                prop::sample::select(Season::ALL.to_vec()),
            ),
            0..max_len,
        )
        .prop_map(|rows| {
            let mut date = base_date() - Duration::days(1);
            rows.into_iter()
                .map(|(gap, casual, registered, season)| {
                    date += Duration::days(gap);
                    let year = u8::try_from(date.year() - base_date().year()).unwrap_or(u8::MAX);
                    let month = u8::try_from(date.month()).unwrap_or_default();
                    DailyRecord::from_counts(date, year, season, month, casual, registered)
                })
                .collect()
        })
    }

    /// Strategy for hourly record sets over the first sixty days.
    pub fn hourly_records_strategy(max_len: usize) -> impl Strategy<Value = Vec<HourlyRecord>> {
        prop::collection::vec((0i64..60, 0u8..24, 0u32..1_000), 0..max_len).prop_map(|rows| {
            rows.into_iter()
                .map(|(offset, hour, total)| HourlyRecord {
                    date: base_date() + Duration::days(offset),
                    hour,
                    total,
                })
                .collect()
        })
    }

    /// Strategy for valid intervals, partly outside the generated data.
    pub fn interval_strategy() -> impl Strategy<Value = DateInterval> {
        (-30i64..200, 0i64..120).prop_map(|(offset, len)| {
            let start = base_date() + Duration::days(offset);
            DateInterval::new(start, start + Duration::days(len)).expect("non-negative length")
        })
    }
}
