//! Rentals by hour of day line chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};

/// Rentals per hour of day over the whole hourly dataset.
///
/// The selected date range does not narrow this chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalsByHourChart;

impl ChartRenderer for RentalsByHourChart {
    fn name(&self) -> &'static str {
        "rentals_by_hour"
    }

    fn description(&self) -> &'static str {
        "Total rentals per hour of the day"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Rentals by Hour".to_string(),
            x_desc: "Hour of Day".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Hours(
                snapshot
                    .by_hour
                    .iter()
                    .map(|row| (row.key, row.total))
                    .collect(),
            ),
        }
    }
}
