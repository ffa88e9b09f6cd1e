//! Immutable in-memory holder of the loaded datasets.

use crate::filter::filter_by_interval;
use bikedash_common::{DailyRecord, DateInterval, HourlyRecord};
use chrono::Datelike;
use tracing::debug;

/// Daily and hourly record collections plus the daily date bounds.
///
/// Built once after loading and passed by reference to everything that
/// reads the data.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
    bounds: Option<DateInterval>,
}

impl RecordStore {
    /// Creates a store, computing the minimum and maximum daily dates.
    pub fn new(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        let bounds = daily
            .iter()
            .map(|r| r.date)
            .min()
            .zip(daily.iter().map(|r| r.date).max())
            .and_then(|(start, end)| DateInterval::new(start, end).ok());

        debug!(
            daily = daily.len(),
            hourly = hourly.len(),
            bounds = ?bounds,
            "Created record store"
        );

        Self {
            daily,
            hourly,
            bounds,
        }
    }

    /// All daily records in load order.
    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    /// All hourly records in load order.
    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// First and last daily date, `None` for an empty daily set.
    pub const fn bounds(&self) -> Option<DateInterval> {
        self.bounds
    }

    /// Calendar year of the earliest daily record; year code 0 maps to it.
    pub fn base_year(&self) -> Option<i32> {
        self.bounds.map(|b| b.start().year())
    }

    /// Whether the daily set has no rows.
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// Restricts `interval` to the dataset bounds.
    ///
    /// Returns `None` when the store is empty or the interval lies entirely
    /// outside the bounds.
    pub fn clamp(&self, interval: &DateInterval) -> Option<DateInterval> {
        self.bounds.and_then(|bounds| bounds.intersect(interval))
    }

    /// Daily records inside the clamped interval; empty when nothing overlaps.
    pub fn select(&self, interval: &DateInterval) -> Vec<DailyRecord> {
        self.clamp(interval)
            .map(|effective| filter_by_interval(&self.daily, &effective))
            .unwrap_or_default()
    }
}
