//! Default values for every configuration section.

use crate::schema::*;
use bikedash_common::LoggingConfig;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            dashboard: DashboardConfig::default(),
            output: OutputConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            daily_path: PathBuf::from("day.csv"),
            hourly_path: PathBuf::from("hour.csv"),
            verify_totals: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Bike Rental Dashboard".to_string(),
            footer: None,
            require_rows: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("dashboard"),
            format: ImageFormat::Png,
            write_snapshot: false,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: EnabledChartsConfig::default(),
            styling: StylingConfig::default(),
        }
    }
}

impl Default for EnabledChartsConfig {
    fn default() -> Self {
        Self {
            daily_rentals: false,
            rentals_by_year: false,
            rentals_by_season: true,
            rentals_by_month: true,
            rentals_by_hour: true,
            user_types: false,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            enable_grid: true,
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#2c3e50".to_string(),
            line: "#ffa500".to_string(),
            palette: vec![
                "#2c5d8a".to_string(),
                "#327a9a".to_string(),
                "#3a96a4".to_string(),
                "#4eb0a6".to_string(),
                "#75c8a4".to_string(),
                "#a8dca5".to_string(),
            ],
        }
    }
}
