//! Record types for the daily and hourly rental datasets.

use crate::error::{DashError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological season as coded in the rental datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Code 1.
    Spring = 1,
    /// Code 2.
    Summer = 2,
    /// Code 3.
    Fall = 3,
    /// Code 4.
    Winter = 4,
}

impl Season {
    /// All seasons in code order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Numeric code used in the source files.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl TryFrom<u8> for Season {
    type Error = DashError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Spring),
            2 => Ok(Self::Summer),
            3 => Ok(Self::Fall),
            4 => Ok(Self::Winter),
            other => Err(DashError::data(format!("unknown season code {other}"))),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rider category used by the user-type breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Riders without a membership.
    Casual,
    /// Members.
    Registered,
}

impl UserType {
    /// Human readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Casual => "Casual Users",
            Self::Registered => "Registered Users",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the daily dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date, unique across the daily set.
    pub date: NaiveDate,
    /// Year code relative to the first year of the dataset (0, 1, ...).
    pub year: u8,
    /// Season of the date.
    pub season: Season,
    /// Month of the year, 1-12.
    pub month: u8,
    /// Rentals by casual riders.
    pub casual: u32,
    /// Rentals by registered riders.
    pub registered: u32,
    /// All rentals; equals `casual + registered` in consistent data.
    pub total: u32,
}

impl DailyRecord {
    /// Build a record whose total is derived from the two rider counts.
    ///
    /// The total saturates at `u32::MAX`; such a record is not consistent.
    pub const fn from_counts(
        date: NaiveDate,
        year: u8,
        season: Season,
        month: u8,
        casual: u32,
        registered: u32,
    ) -> Self {
        Self {
            date,
            year,
            season,
            month,
            casual,
            registered,
            total: casual.saturating_add(registered),
        }
    }

    /// Whether `total` equals `casual + registered`.
    pub const fn is_consistent(&self) -> bool {
        self.casual as u64 + self.registered as u64 == self.total as u64
    }
}

/// One row of the hourly dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Calendar date.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// All rentals in that hour.
    pub total: u32,
}

/// Closed interval of calendar dates, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    /// Create an interval, rejecting a start that lies after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Interval covering exactly one day.
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day, inclusive.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day, inclusive.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the interval (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two intervals, `None` when they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Number of days covered, both ends counted.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl<'de> Deserialize<'de> for DateInterval {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// One output pair of a grouped reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow<K> {
    /// Grouping key.
    pub key: K,
    /// Summed count for the key.
    pub total: u64,
}

impl<K> AggregateRow<K> {
    /// Create a new aggregate row.
    pub const fn new(key: K, total: u64) -> Self {
        Self { key, total }
    }
}
