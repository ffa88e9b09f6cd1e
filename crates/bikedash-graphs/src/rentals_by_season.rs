//! Rentals by season bar chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};

/// Rentals per season in season order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalsBySeasonChart;

impl ChartRenderer for RentalsBySeasonChart {
    fn name(&self) -> &'static str {
        "rentals_by_season"
    }

    fn description(&self) -> &'static str {
        "Total rentals per season"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Rentals by Season".to_string(),
            x_desc: "Season".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Bars(
                snapshot
                    .by_season
                    .iter()
                    .map(|row| (row.key.label().to_string(), row.total))
                    .collect(),
            ),
        }
    }
}
