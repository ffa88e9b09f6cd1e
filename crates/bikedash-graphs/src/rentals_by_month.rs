//! Rentals by month bar chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};
use bikedash_common::month_label;

/// Rentals per month number.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalsByMonthChart;

impl ChartRenderer for RentalsByMonthChart {
    fn name(&self) -> &'static str {
        "rentals_by_month"
    }

    fn description(&self) -> &'static str {
        "Total rentals per month of the year"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Rentals by Month".to_string(),
            x_desc: "Month".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Bars(
                snapshot
                    .by_month
                    .iter()
                    .map(|row| (month_label(row.key), row.total))
                    .collect(),
            ),
        }
    }
}
