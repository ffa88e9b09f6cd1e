//! CSV ingest of the daily and hourly rental datasets.

use crate::store::RecordStore;
use bikedash_common::{DailyRecord, DashError, HourlyRecord, Result, Season};
use bikedash_config::DataConfig;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns read from the daily file.
pub const DAILY_COLUMNS: [&str; 7] = ["dteday", "yr", "season", "mnth", "casual", "registered", "cnt"];

/// Columns read from the hourly file.
pub const HOURLY_COLUMNS: [&str; 3] = ["dteday", "hr", "cnt"];

/// Reads the two datasets into typed records.
#[derive(Debug, Clone, Copy)]
pub struct DataLoader {
    verify_totals: bool,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DataLoader {
    /// Creates a loader; with `verify_totals` an inconsistent daily row is an error.
    pub const fn new(verify_totals: bool) -> Self {
        Self { verify_totals }
    }

    /// Creates a loader from the `data` configuration section.
    pub const fn from_config(config: &DataConfig) -> Self {
        Self::new(config.verify_totals)
    }

    /// Loads both configured files into a [`RecordStore`].
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, missing columns or malformed cells.
    #[instrument(skip(self, config), fields(daily = %config.daily_path.display(), hourly = %config.hourly_path.display()))]
    pub fn load_store(&self, config: &DataConfig) -> Result<RecordStore> {
        let daily = self.load_daily(&config.daily_path)?;
        let hourly = self.load_hourly(&config.hourly_path)?;
        let store = RecordStore::new(daily, hourly);

        if let Some(bounds) = store.bounds() {
            info!(%bounds, "Dataset date bounds");
        } else {
            warn!("Daily dataset has no rows");
        }
        Ok(store)
    }

    /// Loads the daily file at `path`.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable file, a missing column or a malformed cell.
    pub fn load_daily(&self, path: &Path) -> Result<Vec<DailyRecord>> {
        let records = self.read_daily(File::open(path)?, &source_name(path))?;
        info!(rows = records.len(), path = %path.display(), "Loaded daily records");
        Ok(records)
    }

    /// Loads the hourly file at `path`.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable file, a missing column or a malformed cell.
    pub fn load_hourly(&self, path: &Path) -> Result<Vec<HourlyRecord>> {
        let records = self.read_hourly(File::open(path)?, &source_name(path))?;
        info!(rows = records.len(), path = %path.display(), "Loaded hourly records");
        Ok(records)
    }

    /// Parses daily CSV text; `source` names the input in errors.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` before reading rows when a column is absent,
    /// and `Data` with the line number for malformed or inconsistent rows.
    pub fn read_daily<R: Read>(&self, reader: R, source: &str) -> Result<Vec<DailyRecord>> {
        let mut reader = csv_reader(reader);
        let columns = ColumnMap::resolve(reader.headers()?, &DAILY_COLUMNS, source)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let cells = Cells::new(&row, &columns, idx);

            let season_code: u8 = cells.parse("season")?;
            let season = Season::try_from(season_code).map_err(|_| {
                cells.error("season", &format!("unknown season code {season_code}"))
            })?;
            let month: u8 = cells.parse("mnth")?;
            if !(1..=12).contains(&month) {
                return Err(cells.error("mnth", &format!("month {month} is outside 1-12")));
            }

            let record = DailyRecord {
                date: cells.date("dteday")?,
                year: cells.parse("yr")?,
                season,
                month,
                casual: cells.parse("casual")?,
                registered: cells.parse("registered")?,
                total: cells.parse("cnt")?,
            };

            if !record.is_consistent() {
                if self.verify_totals {
                    return Err(DashError::data_at_line(
                        format!(
                            "casual ({}) + registered ({}) does not equal cnt ({}) in {source}",
                            record.casual, record.registered, record.total
                        ),
                        cells.line,
                    ));
                }
                warn!(
                    line = cells.line,
                    date = %record.date,
                    "Daily total does not equal casual + registered"
                );
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Parses hourly CSV text; `source` names the input in errors.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` before reading rows when a column is absent,
    /// and `Data` with the line number for malformed rows.
    pub fn read_hourly<R: Read>(&self, reader: R, source: &str) -> Result<Vec<HourlyRecord>> {
        let mut reader = csv_reader(reader);
        let columns = ColumnMap::resolve(reader.headers()?, &HOURLY_COLUMNS, source)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let cells = Cells::new(&row, &columns, idx);

            let hour: u8 = cells.parse("hr")?;
            if hour > 23 {
                return Err(cells.error("hr", &format!("hour {hour} is outside 0-23")));
            }

            records.push(HourlyRecord {
                date: cells.date("dteday")?,
                hour,
                total: cells.parse("cnt")?,
            });
        }

        Ok(records)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Positions of the required columns in one file.
struct ColumnMap(HashMap<&'static str, usize>);

impl ColumnMap {
    fn resolve(headers: &StringRecord, required: &[&'static str], source: &str) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header(name), idx))
            .collect();

        let mut map = HashMap::with_capacity(required.len());
        for &column in required {
            let idx = positions
                .get(column)
                .ok_or_else(|| DashError::missing_field(column, source))?;
            map.insert(column, *idx);
        }
        Ok(Self(map))
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

/// Typed access to the cells of one data row.
struct Cells<'a> {
    row: &'a StringRecord,
    columns: &'a ColumnMap,
    line: u64,
}

impl<'a> Cells<'a> {
    fn new(row: &'a StringRecord, columns: &'a ColumnMap, idx: usize) -> Self {
        // Header is line 1, first data row line 2.
        let line = row
            .position()
            .map_or(idx as u64 + 2, csv::Position::line);
        Self { row, columns, line }
    }

    fn raw(&self, column: &str) -> &'a str {
        self.columns
            .0
            .get(column)
            .and_then(|&idx| self.row.get(idx))
            .unwrap_or_default()
    }

    fn error(&self, column: &str, reason: &str) -> DashError {
        DashError::data_at_line(format!("column '{column}': {reason}"), self.line)
    }

    fn parse<T>(&self, column: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.raw(column);
        raw.parse()
            .map_err(|e: T::Err| self.error(column, &format!("invalid value '{raw}': {e}")))
    }

    fn date(&self, column: &str) -> Result<NaiveDate> {
        let raw = self.raw(column);
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| self.error(column, &format!("invalid date '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_common::test_utils::csv_fixtures::{daily_csv, hourly_csv};
    use bikedash_common::test_utils::record_fixtures::{
        sample_daily_records, sample_hourly_records,
    };
    use bikedash_common::test_utils::ymd;

    #[test]
    fn test_read_daily_fixture() {
        let text = daily_csv(&sample_daily_records());
        let records = DataLoader::default()
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap();
        assert_eq!(records, sample_daily_records());
    }

    #[test]
    fn test_read_hourly_fixture() {
        let text = hourly_csv(&sample_hourly_records());
        let records = DataLoader::default()
            .read_hourly(text.as_bytes(), "hour.csv")
            .unwrap();
        assert_eq!(records, sample_hourly_records());
    }

    #[test]
    fn test_minimal_columns_any_case_and_bom() {
        let text = "\u{feff}DTEDAY, Yr ,Season,MNTH,casual,registered,CNT\n2011-01-01,0,1,1,331,654,985\n";
        let records = DataLoader::default()
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, ymd(2011, 1, 1));
        assert_eq!(records[0].total, 985);
    }

    #[test]
    fn test_missing_column_reported_before_rows() {
        let text = "dteday,yr,season,mnth,casual,registered\nnot-a-date,x,y,z,1,2\n";
        let err = DataLoader::default()
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap_err();
        match err {
            DashError::MissingField { column, file } => {
                assert_eq!(column, "cnt");
                assert_eq!(file, "day.csv");
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn test_hourly_missing_hour_column() {
        let text = "dteday,cnt\n2011-01-01,16\n";
        let err = DataLoader::default()
            .read_hourly(text.as_bytes(), "hour.csv")
            .unwrap_err();
        assert!(matches!(err, DashError::MissingField { ref column, .. } if column == "hr"));
    }

    #[test]
    fn test_malformed_cell_names_line_and_column() {
        let text = "dteday,hr,cnt\n2011-01-01,0,16\n2011-01-01,1,forty\n";
        let err = DataLoader::default()
            .read_hourly(text.as_bytes(), "hour.csv")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("column 'cnt'"), "{message}");
    }

    #[test]
    fn test_bad_date_and_hour() {
        let bad_date = "dteday,hr,cnt\n01/01/2011,0,16\n";
        let err = DataLoader::default()
            .read_hourly(bad_date.as_bytes(), "hour.csv")
            .unwrap_err();
        assert!(err.to_string().contains("invalid date '01/01/2011'"));

        let bad_hour = "dteday,hr,cnt\n2011-01-01,24,16\n";
        let err = DataLoader::default()
            .read_hourly(bad_hour.as_bytes(), "hour.csv")
            .unwrap_err();
        assert!(err.to_string().contains("hour 24 is outside 0-23"));
    }

    #[test]
    fn test_unknown_season_code() {
        let text = "dteday,yr,season,mnth,casual,registered,cnt\n2011-01-01,0,7,1,1,2,3\n";
        let err = DataLoader::default()
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap_err();
        assert!(err.to_string().contains("unknown season code 7"));
    }

    #[test]
    fn test_inconsistent_totals() {
        let text = "dteday,yr,season,mnth,casual,registered,cnt\n2011-01-01,0,1,1,10,20,31\n";

        let err = DataLoader::new(true)
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap_err();
        assert!(matches!(err, DashError::Data { line: Some(2), .. }));

        let records = DataLoader::new(false)
            .read_daily(text.as_bytes(), "day.csv")
            .unwrap();
        assert_eq!(records[0].total, 31);
        assert!(!records[0].is_consistent());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let records = DataLoader::default()
            .read_hourly("dteday,hr,cnt\n".as_bytes(), "hour.csv")
            .unwrap();
        assert!(records.is_empty());
    }
}
