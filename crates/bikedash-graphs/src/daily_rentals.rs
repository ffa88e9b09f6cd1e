//! Daily rentals line chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};

/// Rentals per day over the selected range.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyRentalsChart;

impl ChartRenderer for DailyRentalsChart {
    fn name(&self) -> &'static str {
        "daily_rentals"
    }

    fn description(&self) -> &'static str {
        "Total rentals per day in the selected date range"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Daily Rentals".to_string(),
            x_desc: "Date".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Dates(
                snapshot
                    .by_date
                    .iter()
                    .map(|row| (row.key, row.total))
                    .collect(),
            ),
        }
    }
}
