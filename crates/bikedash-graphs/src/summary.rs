//! Headline totals shown as metric badges.

use bikedash_common::DailyRecord;
use serde::{Deserialize, Serialize};

/// Three scalar totals over a record selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Sum of `casual`.
    pub casual_total: u64,
    /// Sum of `registered`.
    pub registered_total: u64,
    /// Sum of `total`.
    pub grand_total: u64,
}

impl SummaryMetrics {
    /// Whether `casual_total + registered_total == grand_total`.
    pub const fn is_consistent(&self) -> bool {
        self.casual_total + self.registered_total == self.grand_total
    }
}

/// Sums the rider counts and totals of `records`.
pub fn summarize(records: &[DailyRecord]) -> SummaryMetrics {
    records
        .iter()
        .fold(SummaryMetrics::default(), |acc, record| SummaryMetrics {
            casual_total: acc.casual_total + u64::from(record.casual),
            registered_total: acc.registered_total + u64::from(record.registered),
            grand_total: acc.grand_total + u64::from(record.total),
        })
}
