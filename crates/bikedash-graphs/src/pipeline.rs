//! Per-interval recomputation of every dashboard aggregate.

use crate::aggregator::{
    by_date, by_hour, by_month, by_season, by_year, ensure_non_empty, user_type_totals,
};
use crate::store::RecordStore;
use crate::summary::{summarize, SummaryMetrics};
use bikedash_common::{AggregateRow, DashError, DateInterval, Result, Season, UserType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Options controlling how the pipeline treats empty selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Fail with `EmptyInput` instead of returning empty aggregates.
    pub require_rows: bool,
}

/// Everything the rendering layer needs for one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Interval as requested by the caller.
    pub requested: DateInterval,
    /// Requested interval clamped to the dataset bounds, `None` if disjoint.
    pub effective: Option<DateInterval>,
    /// Calendar year that year code 0 stands for.
    pub base_year: Option<i32>,
    /// Rentals per date.
    pub by_date: Vec<AggregateRow<NaiveDate>>,
    /// Rentals per year code.
    pub by_year: Vec<AggregateRow<u8>>,
    /// Rentals per season.
    pub by_season: Vec<AggregateRow<Season>>,
    /// Rentals per month.
    pub by_month: Vec<AggregateRow<u8>>,
    /// Rentals per hour over the whole hourly dataset.
    pub by_hour: Vec<AggregateRow<u8>>,
    /// Casual then registered totals.
    pub user_types: Vec<AggregateRow<UserType>>,
    /// Headline totals.
    pub summary: SummaryMetrics,
}

impl DashboardSnapshot {
    /// Number of distinct dates in the filtered selection.
    pub fn selected_days(&self) -> usize {
        self.by_date.len()
    }
}

/// Computes dashboard snapshots from an immutable [`RecordStore`].
#[derive(Debug, Clone, Copy)]
pub struct DashboardPipeline<'a> {
    store: &'a RecordStore,
    options: PipelineOptions,
}

impl<'a> DashboardPipeline<'a> {
    /// Creates a pipeline over `store`.
    pub const fn new(store: &'a RecordStore, options: PipelineOptions) -> Self {
        Self { store, options }
    }

    /// Recomputes all aggregates for `interval`.
    ///
    /// The interval is clamped to the dataset bounds first. An interval that
    /// does not overlap the data produces empty aggregates and zero metrics,
    /// unless rows are required. By-hour always covers the full hourly set.
    ///
    /// # Errors
    ///
    /// Returns `DashError::EmptyInput` when rows are required and the
    /// selection is empty.
    #[instrument(skip(self, interval), fields(interval = %interval))]
    pub fn compute(&self, interval: DateInterval) -> Result<DashboardSnapshot> {
        let effective = self.store.clamp(&interval);
        let selected = self.store.select(&interval);
        debug!(effective = ?effective, rows = selected.len(), "Selected daily records");

        if self.options.require_rows {
            ensure_non_empty(&selected, "the selected date range")?;
        }

        let snapshot = DashboardSnapshot {
            requested: interval,
            effective,
            base_year: self.store.base_year(),
            by_date: by_date(&selected),
            by_year: by_year(&selected),
            by_season: by_season(&selected),
            by_month: by_month(&selected),
            by_hour: by_hour(self.store.hourly()),
            user_types: user_type_totals(&selected),
            summary: summarize(&selected),
        };

        info!(
            days = snapshot.selected_days(),
            total = snapshot.summary.grand_total,
            "Computed dashboard snapshot"
        );
        Ok(snapshot)
    }

    /// Computes the snapshot over the dataset's full date range.
    ///
    /// # Errors
    ///
    /// Returns `DashError::EmptyInput` when the daily set has no rows.
    pub fn compute_full_range(&self) -> Result<DashboardSnapshot> {
        let bounds = self
            .store
            .bounds()
            .ok_or_else(|| DashError::empty_input("the full date range"))?;
        self.compute(bounds)
    }
}
