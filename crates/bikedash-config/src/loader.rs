//! Configuration loading utilities

use crate::schema::{Config, ImageFormat};
use bikedash_common::{DashError, Result as DashResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BIKEDASH_CONFIG_PATH";

/// File names probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["bikedash.yaml", "bikedash.yml", "bikedash.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(message) => Self::config(message),
            other => Self::config_with_source(other.to_string(), other),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::parse_file(path)?;
        info!(path = %path.display(), "Loaded configuration file");

        Self::apply_env_overrides(&mut config)?;
        config
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration from the environment and the working directory.
    ///
    /// Uses `BIKEDASH_CONFIG_PATH` if set, then the first of
    /// [`DEFAULT_CONFIG_FILES`] that exists, and falls back to defaults.
    pub fn load() -> DashResult<Config> {
        if let Some(path) = Self::locate() {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Path of the configuration file `load` would read, if any.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Parse a file without overrides or validation, by extension.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BIKEDASH_DAILY_CSV") {
            config.data.daily_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("BIKEDASH_HOURLY_CSV") {
            config.data.hourly_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("BIKEDASH_OUTPUT_DIR") {
            config.output.directory = PathBuf::from(dir);
        }

        if let Some(format) = lookup("BIKEDASH_OUTPUT_FORMAT") {
            config.output.format =
                format
                    .parse::<ImageFormat>()
                    .map_err(|message| ConfigError::EnvParseError {
                        var: "BIKEDASH_OUTPUT_FORMAT".to_string(),
                        message,
                    })?;
        }

        if let Some(level) = lookup("BIKEDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(width) = lookup("BIKEDASH_CHART_WIDTH") {
            config.charts.styling.width = parse_var("BIKEDASH_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("BIKEDASH_CHART_HEIGHT") {
            config.charts.styling.height = parse_var("BIKEDASH_CHART_HEIGHT", &height)?;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::EnvParseError {
            var: var.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("BIKEDASH_DAILY_CSV", "/data/day.csv"),
            ("BIKEDASH_HOURLY_CSV", "/data/hour.csv"),
            ("BIKEDASH_OUTPUT_DIR", "/tmp/charts"),
            ("BIKEDASH_OUTPUT_FORMAT", "SVG"),
            ("BIKEDASH_LOG_LEVEL", "debug"),
            ("BIKEDASH_CHART_WIDTH", "1280"),
            ("BIKEDASH_CHART_HEIGHT", " 720 "),
        ]);

        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(config.data.daily_path, PathBuf::from("/data/day.csv"));
        assert_eq!(config.data.hourly_path, PathBuf::from("/data/hour.csv"));
        assert_eq!(config.output.directory, PathBuf::from("/tmp/charts"));
        assert_eq!(config.output.format, ImageFormat::Svg);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.charts.styling.width, 1280);
        assert_eq!(config.charts.styling.height, 720);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, |_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_override_names_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(
            &mut config,
            lookup_from(&[("BIKEDASH_CHART_WIDTH", "wide")]),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::EnvParseError { ref var, .. } if var == "BIKEDASH_CHART_WIDTH"));
        let dash: DashError = err.into();
        assert!(dash.to_string().contains("BIKEDASH_CHART_WIDTH"));
    }

    #[test]
    fn test_bad_format_override() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(
            &mut config,
            lookup_from(&[("BIKEDASH_OUTPUT_FORMAT", "gif")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported image format 'gif'"));
    }
}
