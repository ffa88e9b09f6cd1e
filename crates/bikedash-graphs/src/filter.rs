//! Date range filtering of the daily record set.

use bikedash_common::{DailyRecord, DateInterval, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Returns every record whose date lies in `interval`, both ends inclusive.
///
/// Relative order is preserved. No match yields an empty vector.
pub fn filter_by_interval(records: &[DailyRecord], interval: &DateInterval) -> Vec<DailyRecord> {
    let selected: Vec<DailyRecord> = records
        .iter()
        .filter(|record| interval.contains(record.date))
        .copied()
        .collect();

    debug!(
        %interval,
        selected = selected.len(),
        available = records.len(),
        "Filtered daily records"
    );
    selected
}

/// Validates `start <= end`, then filters like [`filter_by_interval`].
///
/// # Errors
///
/// Returns `DashError::InvalidRange` when `start` lies after `end`.
pub fn filter_range(
    records: &[DailyRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyRecord>> {
    let interval = DateInterval::new(start, end)?;
    Ok(filter_by_interval(records, &interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_common::test_utils::{record_fixtures::sample_daily_records, ymd};
    use bikedash_common::DashError;

    #[test]
    fn test_inclusive_bounds() {
        let records = sample_daily_records();
        let interval = DateInterval::new(ymd(2011, 1, 2), ymd(2011, 9, 30)).unwrap();

        let dates: Vec<_> = filter_by_interval(&records, &interval)
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec![ymd(2011, 1, 2), ymd(2011, 6, 15), ymd(2011, 9, 30)]);
    }

    #[test]
    fn test_single_day() {
        let records = sample_daily_records();
        let selected = filter_by_interval(&records, &DateInterval::single_day(ymd(2011, 6, 15)));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].total, 5000);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample_daily_records();
        let interval = DateInterval::new(ymd(2013, 1, 1), ymd(2013, 12, 31)).unwrap();
        assert!(filter_by_interval(&records, &interval).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let mut records = sample_daily_records();
        records.reverse();
        let interval = DateInterval::new(ymd(2011, 1, 1), ymd(2011, 1, 2)).unwrap();

        let selected = filter_by_interval(&records, &interval);
        assert_eq!(selected[0].date, ymd(2011, 1, 2));
        assert_eq!(selected[1].date, ymd(2011, 1, 1));
    }

    #[test]
    fn test_filter_range_rejects_reversed_pair() {
        let records = sample_daily_records();
        let err = filter_range(&records, ymd(2011, 2, 1), ymd(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashError::InvalidRange { .. }));

        let ok = filter_range(&records, ymd(2011, 1, 1), ymd(2011, 1, 1)).unwrap();
        assert_eq!(ok.len(), 1);
    }
}
