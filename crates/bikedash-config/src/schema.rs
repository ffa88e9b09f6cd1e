//! Configuration schema definitions using serde.

use bikedash_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input dataset configuration.
    pub data: DataConfig,
    /// Dashboard page configuration.
    pub dashboard: DashboardConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Chart configuration.
    pub charts: ChartsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Input dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the daily dataset (`day.csv`).
    pub daily_path: PathBuf,
    /// Path of the hourly dataset (`hour.csv`).
    pub hourly_path: PathBuf,
    /// Reject daily rows whose total is not casual + registered.
    pub verify_totals: bool,
}

/// Dashboard page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Header printed above the metrics.
    pub title: String,
    /// Optional footer line.
    pub footer: Option<String>,
    /// Fail instead of producing empty charts when the selection has no rows.
    pub require_rows: bool,
}

/// Image format of rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Bitmap output.
    #[default]
    Png,
    /// Vector output.
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported image format '{other}', expected png or svg")),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory charts and the snapshot are written to.
    pub directory: PathBuf,
    /// Chart image format.
    pub format: ImageFormat,
    /// Also write the computed aggregates as `snapshot.json`.
    pub write_snapshot: bool,
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Enabled charts configuration.
    pub enabled: EnabledChartsConfig,
    /// Styling configuration.
    pub styling: StylingConfig,
}

/// Enabled charts configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledChartsConfig {
    /// Rentals per day over the selected range.
    pub daily_rentals: bool,
    /// Rentals per dataset year.
    pub rentals_by_year: bool,
    /// Rentals per season.
    pub rentals_by_season: bool,
    /// Rentals per month.
    pub rentals_by_month: bool,
    /// Rentals per hour of day.
    pub rentals_by_hour: bool,
    /// Casual vs. registered totals.
    pub user_types: bool,
}

impl EnabledChartsConfig {
    /// Whether the chart with the given renderer name is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            "daily_rentals" => self.daily_rentals,
            "rentals_by_year" => self.rentals_by_year,
            "rentals_by_season" => self.rentals_by_season,
            "rentals_by_month" => self.rentals_by_month,
            "rentals_by_hour" => self.rentals_by_hour,
            "user_types" => self.user_types,
            _ => false,
        }
    }
}

/// Styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether to draw grid lines.
    pub enable_grid: bool,
    /// Color configuration.
    pub colors: ColorsConfig,
}

/// Color configuration, all `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Background color.
    pub background: String,
    /// Caption and axis label color.
    pub text: String,
    /// Color of line charts.
    pub line: String,
    /// Bar colors, cycled per category.
    pub palette: Vec<String>,
}
