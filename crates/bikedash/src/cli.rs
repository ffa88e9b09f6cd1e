//! Command line interface.

use bikedash_config::{Config, ImageFormat};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Bike rental dashboard: filter by date range, aggregate, render charts.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "bikedash", version, about)]
pub struct Cli {
    /// Configuration file (YAML or TOML); defaults to BIKEDASH_CONFIG_PATH or ./bikedash.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First day of the date range (YYYY-MM-DD); defaults to the first day in the data
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD); defaults to the last day in the data
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Directory charts are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Chart image format: png or svg
    #[arg(short, long)]
    pub format: Option<ImageFormat>,

    /// Print the report without rendering charts
    #[arg(long)]
    pub no_charts: bool,

    /// Also write the computed aggregates to snapshot.json
    #[arg(long)]
    pub snapshot: bool,
}

impl Cli {
    /// Applies command line flags on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.output.directory.clone_from(dir);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.snapshot {
            config.output.write_snapshot = true;
        }
    }
}
