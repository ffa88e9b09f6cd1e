//! Rentals by year bar chart.

use crate::pipeline::DashboardSnapshot;
use crate::traits::ChartRenderer;
use crate::utils::{ChartSeries, ChartSpec};
use bikedash_common::year_label;

/// Rentals per dataset year, labelled with the calendar year.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalsByYearChart;

impl ChartRenderer for RentalsByYearChart {
    fn name(&self) -> &'static str {
        "rentals_by_year"
    }

    fn description(&self) -> &'static str {
        "Total rentals per year"
    }

    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec {
        ChartSpec {
            title: "Rentals by Year".to_string(),
            x_desc: "Year".to_string(),
            y_desc: "Rentals".to_string(),
            series: ChartSeries::Bars(
                snapshot
                    .by_year
                    .iter()
                    .map(|row| (year_label(row.key, snapshot.base_year), row.total))
                    .collect(),
            ),
        }
    }
}
