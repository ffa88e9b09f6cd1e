//! Chart manager writing every enabled chart for a snapshot.

use crate::daily_rentals::DailyRentalsChart;
use crate::pipeline::DashboardSnapshot;
use crate::rentals_by_hour::RentalsByHourChart;
use crate::rentals_by_month::RentalsByMonthChart;
use crate::rentals_by_season::RentalsBySeasonChart;
use crate::rentals_by_year::RentalsByYearChart;
use crate::traits::ChartRenderer;
use crate::user_types::UserTypesChart;
use crate::utils::{chart_error, ChartStyle};
use bikedash_common::Result;
use bikedash_config::Config;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// File name of the serialized snapshot.
pub const SNAPSHOT_FILE_NAME: &str = "snapshot.json";

/// Every chart the dashboard knows, in display order.
pub fn all_renderers() -> Vec<Box<dyn ChartRenderer>> {
    vec![
        Box::new(DailyRentalsChart),
        Box::new(RentalsByYearChart),
        Box::new(RentalsBySeasonChart),
        Box::new(RentalsByMonthChart),
        Box::new(RentalsByHourChart),
        Box::new(UserTypesChart),
    ]
}

/// Renders the enabled charts into an output directory.
pub struct ChartManager {
    renderers: Vec<Box<dyn ChartRenderer>>,
    style: ChartStyle,
    output_dir: PathBuf,
    write_snapshot: bool,
}

impl ChartManager {
    /// Creates a manager with an explicit renderer list.
    pub fn new(
        renderers: Vec<Box<dyn ChartRenderer>>,
        style: ChartStyle,
        output_dir: impl Into<PathBuf>,
        write_snapshot: bool,
    ) -> Self {
        Self {
            renderers,
            style,
            output_dir: output_dir.into(),
            write_snapshot,
        }
    }

    /// Creates a manager holding the charts enabled in `config`.
    pub fn from_config(config: &Config) -> Self {
        let renderers: Vec<Box<dyn ChartRenderer>> = all_renderers()
            .into_iter()
            .filter(|r| config.charts.enabled.is_enabled(r.name()))
            .collect();

        debug!(
            charts = ?renderers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            "Enabled charts"
        );

        Self::new(
            renderers,
            ChartStyle::from_config(&config.charts, config.output.format),
            config.output.directory.clone(),
            config.output.write_snapshot,
        )
    }

    /// Names of the charts this manager renders.
    pub fn renderer_names(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Path a chart named `name` is written to.
    pub fn chart_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{name}.{}", self.style.format.extension()))
    }

    /// Renders every chart and, if enabled, the snapshot file.
    ///
    /// Returns the written paths in order. The first failing chart aborts the run.
    ///
    /// # Errors
    ///
    /// Returns a graph error naming the chart, or an I/O error.
    #[instrument(skip_all, fields(dir = %self.output_dir.display()))]
    pub fn render_all(&self, snapshot: &DashboardSnapshot) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(self.renderers.len() + 1);
        for renderer in &self.renderers {
            let path = self.chart_path(renderer.name());
            renderer
                .render(snapshot, &self.style, &path)
                .map_err(|e| chart_error(renderer.name(), e))?;
            written.push(path);
        }

        if self.write_snapshot {
            written.push(self.write_snapshot(snapshot)?);
        }

        info!(files = written.len(), "Dashboard output written");
        Ok(written)
    }

    /// Writes `snapshot` as pretty JSON into the output directory.
    ///
    /// # Errors
    ///
    /// Returns a serialization or I/O error.
    pub fn write_snapshot(&self, snapshot: &DashboardSnapshot) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(SNAPSHOT_FILE_NAME);
        std::fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
        debug!(path = %path.display(), "Wrote snapshot");
        Ok(path)
    }
}
