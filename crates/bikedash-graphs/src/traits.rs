//! Chart renderer trait shared by every dashboard chart.

use crate::pipeline::DashboardSnapshot;
use crate::utils::{draw_chart, ChartSpec, ChartStyle};
use bikedash_common::Result;
use std::path::Path;

/// A chart derived from a [`DashboardSnapshot`].
///
/// Implementors only turn the snapshot into a [`ChartSpec`]; drawing is
/// shared through the provided [`ChartRenderer::render`].
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer: Send + Sync {
    /// Gets the name of this chart, also used as its file stem.
    fn name(&self) -> &'static str;

    /// Gets the description of this chart.
    fn description(&self) -> &'static str;

    /// Prepares the plotted data.
    fn chart(&self, snapshot: &DashboardSnapshot) -> ChartSpec;

    /// Renders the chart for `snapshot` into an image at `path`.
    ///
    /// # Errors
    ///
    /// Returns a graph or I/O error when drawing fails.
    fn render(&self, snapshot: &DashboardSnapshot, style: &ChartStyle, path: &Path) -> Result<()> {
        draw_chart(&self.chart(snapshot), style, path)
    }
}
