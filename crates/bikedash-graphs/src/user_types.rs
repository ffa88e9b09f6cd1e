//! Casual vs. registered rentals bar chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};

/// Casual and registered totals side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserTypesChart;

impl ChartRenderer for UserTypesChart {
    fn name(&self) -> &'static str {
        "user_types"
    }

    fn description(&self) -> &'static str {
        "Rentals by casual and registered users"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Rentals by User Type".to_string(),
            x_desc: "User Type".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Bars(
                snapshot
                    .user_types
                    .iter()
                    .map(|row| (row.key.label().to_string(), row.total))
                    .collect(),
            ),
        }
    }
}
