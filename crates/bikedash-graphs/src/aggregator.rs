//! Grouped summation of daily and hourly records into chart-ready rows.

use bikedash_common::{
    AggregateRow, DailyRecord, DashError, HourlyRecord, Result, Season, UserType,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups `records` by `key_fn` and sums `value_fn` per group.
///
/// Emits one row per distinct key in ascending key order. Sums are exact;
/// values are passed through without checks.
pub fn aggregate<R, K, I, KF, VF>(records: I, key_fn: KF, value_fn: VF) -> Vec<AggregateRow<K>>
where
    I: IntoIterator<Item = R>,
    K: Ord,
    KF: Fn(&R) -> K,
    VF: Fn(&R) -> u64,
{
    let mut groups: BTreeMap<K, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(key_fn(&record)).or_insert(0) += value_fn(&record);
    }

    groups
        .into_iter()
        .map(|(key, total)| AggregateRow::new(key, total))
        .collect()
}

/// Rentals per calendar date.
pub fn by_date(records: &[DailyRecord]) -> Vec<AggregateRow<NaiveDate>> {
    let rows = aggregate(records, |r| r.date, |r| u64::from(r.total));
    debug!("Aggregated {} by-date rows", rows.len());
    rows
}

/// Rentals per dataset year code.
pub fn by_year(records: &[DailyRecord]) -> Vec<AggregateRow<u8>> {
    let rows = aggregate(records, |r| r.year, |r| u64::from(r.total));
    debug!("Aggregated {} by-year rows", rows.len());
    rows
}

/// Rentals per season, in season code order.
pub fn by_season(records: &[DailyRecord]) -> Vec<AggregateRow<Season>> {
    let rows = aggregate(records, |r| r.season, |r| u64::from(r.total));
    debug!("Aggregated {} by-season rows", rows.len());
    rows
}

/// Rentals per month number.
pub fn by_month(records: &[DailyRecord]) -> Vec<AggregateRow<u8>> {
    let rows = aggregate(records, |r| r.month, |r| u64::from(r.total));
    debug!("Aggregated {} by-month rows", rows.len());
    rows
}

/// Rentals per hour of day over whatever hourly rows are passed in.
///
/// The dashboard always passes the full hourly set, not a date-filtered one.
pub fn by_hour(records: &[HourlyRecord]) -> Vec<AggregateRow<u8>> {
    let rows = aggregate(records, |r| r.hour, |r| u64::from(r.total));
    debug!("Aggregated {} by-hour rows", rows.len());
    rows
}

/// Casual and registered totals, always two rows in that order.
pub fn user_type_totals(records: &[DailyRecord]) -> Vec<AggregateRow<UserType>> {
    let (casual, registered) = records.iter().fold((0u64, 0u64), |(c, r), record| {
        (c + u64::from(record.casual), r + u64::from(record.registered))
    });

    vec![
        AggregateRow::new(UserType::Casual, casual),
        AggregateRow::new(UserType::Registered, registered),
    ]
}

/// Fails with `EmptyInput` when `rows` is empty, for callers that require data.
///
/// # Errors
///
/// Returns `DashError::EmptyInput` naming `operation`.
pub fn ensure_non_empty<T>(rows: &[T], operation: &str) -> Result<()> {
    if rows.is_empty() {
        return Err(DashError::empty_input(operation));
    }
    Ok(())
}
