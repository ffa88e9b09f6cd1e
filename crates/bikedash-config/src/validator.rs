//! Runtime validation of a loaded configuration.

use crate::schema::{ColorsConfig, Config};
use bikedash_common::{DashError, Result};

/// Smallest accepted chart edge in pixels.
pub const MIN_CHART_DIMENSION: u32 = 64;
/// Largest accepted chart edge in pixels.
pub const MAX_CHART_DIMENSION: u32 = 8192;

impl Config {
    /// Validates the configuration, reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.data.daily_path.as_os_str().is_empty() {
            return Err(DashError::config("data.daily_path cannot be empty"));
        }

        if self.data.hourly_path.as_os_str().is_empty() {
            return Err(DashError::config("data.hourly_path cannot be empty"));
        }

        if self.dashboard.title.trim().is_empty() {
            return Err(DashError::config("dashboard.title cannot be empty"));
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(DashError::config("output.directory cannot be empty"));
        }

        let styling = &self.charts.styling;
        for (name, value) in [("width", styling.width), ("height", styling.height)] {
            if !(MIN_CHART_DIMENSION..=MAX_CHART_DIMENSION).contains(&value) {
                return Err(DashError::config(format!(
                    "charts.styling.{name} must be between {MIN_CHART_DIMENSION} and {MAX_CHART_DIMENSION}, got {value}"
                )));
            }
        }

        validate_colors(&styling.colors)
    }
}

fn validate_colors(colors: &ColorsConfig) -> Result<()> {
    for (name, value) in [
        ("background", &colors.background),
        ("text", &colors.text),
        ("line", &colors.line),
    ] {
        if !is_hex_color(value) {
            return Err(DashError::config(format!(
                "charts.styling.colors.{name} must be a #RRGGBB color, got '{value}'"
            )));
        }
    }

    if colors.palette.is_empty() {
        return Err(DashError::config("charts.styling.colors.palette cannot be empty"));
    }

    if let Some(bad) = colors.palette.iter().find(|c| !is_hex_color(c)) {
        return Err(DashError::config(format!(
            "charts.styling.colors.palette entries must be #RRGGBB colors, got '{bad}'"
        )));
    }

    Ok(())
}

/// Whether `value` is a `#RRGGBB` hex color.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#ffffff"));
        assert!(is_hex_color("#1F77b4"));
        assert!(!is_hex_color("ffffff"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut config = Config::default();
        config.data.daily_path = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("data.daily_path"));

        let mut config = Config::default();
        config.data.hourly_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dimensions_bounded() {
        let mut config = Config::default();
        config.charts.styling.width = 10;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("charts.styling.width"));

        config.charts.styling.width = MAX_CHART_DIMENSION;
        config.charts.styling.height = MAX_CHART_DIMENSION + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("charts.styling.height"));
    }

    #[test]
    fn test_colors_checked() {
        let mut config = Config::default();
        config.charts.styling.colors.line = "orange".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.charts.styling.colors.palette.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("palette cannot be empty"));

        let mut config = Config::default();
        config.charts.styling.colors.palette.push("#12345".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut config = Config::default();
        config.dashboard.title = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
