//! Load, compute and render orchestration.

use crate::error::{AppError, AppResult};
use crate::report::render_report;
use bikedash_common::DateInterval;
use bikedash_config::{Config, ConfigLoader};
use bikedash_graphs::{
    ChartManager, DashboardPipeline, DashboardSnapshot, DataLoader, PipelineOptions, RecordStore,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What a single run should compute and write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// First day; defaults to the first day in the data.
    pub start: Option<NaiveDate>,
    /// Last day; defaults to the last day in the data.
    pub end: Option<NaiveDate>,
    /// Skip chart rendering.
    pub skip_charts: bool,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Computed aggregates.
    pub snapshot: DashboardSnapshot,
    /// Text report.
    pub report: String,
    /// Files written, charts first.
    pub written: Vec<PathBuf>,
}

/// Loads configuration from `path`, or from the environment when `None`.
///
/// # Errors
///
/// Fails when the file is missing, unparsable or invalid.
pub fn load_config(path: Option<&Path>) -> AppResult<Config> {
    match path {
        Some(path) if !path.exists() => Err(AppError::ConfigNotFound(path.to_path_buf())),
        Some(path) => Ok(ConfigLoader::load_from_file(path)?),
        None => Ok(ConfigLoader::load()?),
    }
}

/// Resolves optional command line bounds against the dataset bounds.
///
/// Returns `None` when neither bound was given, meaning the full range.
///
/// # Errors
///
/// Returns `InvalidRange` when the resolved start lies after the end.
pub fn resolve_interval(
    store: &RecordStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<Option<DateInterval>> {
    let bounds = store.bounds();
    let (start, end) = match (start, end) {
        (None, None) => return Ok(None),
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, bounds.map_or(start, |b| b.end().max(start))),
        (None, Some(end)) => (bounds.map_or(end, |b| b.start().min(end)), end),
    };
    Ok(Some(DateInterval::new(start, end)?))
}

/// The dashboard application for one configuration.
pub struct DashboardApp {
    config: Config,
}

impl DashboardApp {
    /// Creates the application.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the datasets, computes the snapshot, renders charts and the report.
    ///
    /// # Errors
    ///
    /// Any loading, range, empty-input or rendering error ends the run.
    #[instrument(skip(self))]
    pub fn run(&self, request: RunRequest) -> AppResult<RunOutcome> {
        let store = DataLoader::from_config(&self.config.data).load_store(&self.config.data)?;
        let pipeline = DashboardPipeline::new(
            &store,
            PipelineOptions {
                require_rows: self.config.dashboard.require_rows,
            },
        );

        let snapshot = match resolve_interval(&store, request.start, request.end)? {
            Some(interval) => pipeline.compute(interval)?,
            None => pipeline.compute_full_range()?,
        };
        if snapshot.effective.is_none() {
            warn!(requested = %snapshot.requested, "Requested range does not overlap the data");
        }

        let written = if request.skip_charts {
            info!("Chart rendering skipped");
            if self.config.output.write_snapshot {
                vec![ChartManager::from_config(&self.config).write_snapshot(&snapshot)?]
            } else {
                Vec::new()
            }
        } else {
            ChartManager::from_config(&self.config).render_all(&snapshot)?
        };

        let report = render_report(
            &self.config.dashboard.title,
            self.config.dashboard.footer.as_deref(),
            &snapshot,
        );

        Ok(RunOutcome {
            snapshot,
            report,
            written,
        })
    }
}
