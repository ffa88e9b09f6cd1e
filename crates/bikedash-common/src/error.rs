//! Error types and utilities for the dashboard.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashError>;

/// Main error type for dashboard operations.
#[derive(Error, Debug)]
pub enum DashError {
    /// A date interval whose start lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// A required column is absent from a loaded file.
    #[error("Missing required column '{column}' in {file}")]
    MissingField {
        /// Column name as expected in the header row.
        column: String,
        /// File the column was expected in.
        file: String,
    },

    /// An operation that requires rows was handed none.
    #[error("No rows available for {operation}")]
    EmptyInput {
        /// Operation that required input.
        operation: String,
    },

    /// Malformed or inconsistent input data.
    #[error("Data error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Data {
        message: String,
        line: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chart generation and plotting errors.
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashError {
    /// Create a new invalid range error.
    pub const fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Create a new missing column error.
    pub fn missing_field(column: impl Into<String>, file: impl Into<String>) -> Self {
        Self::MissingField {
            column: column.into(),
            file: file.into(),
        }
    }

    /// Create a new empty input error.
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create a new data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a new data error pointing at a line of the input.
    pub fn data_at_line(msg: impl Into<String>, line: u64) -> Self {
        Self::Data {
            message: msg.into(),
            line: Some(line),
            source: None,
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error.
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source.
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convert from `csv::Error` to `DashError`, keeping the record position.
impl From<csv::Error> for DashError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        Self::Data {
            message: "CSV parse error".to_string(),
            line,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `DashError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_error_creation() {
        let range_error = DashError::invalid_range(date(2011, 1, 5), date(2011, 1, 1));
        assert!(range_error.to_string().contains("Invalid date range"));
        assert!(range_error.to_string().contains("2011-01-05"));

        let missing = DashError::missing_field("cnt", "day.csv");
        assert_eq!(missing.to_string(), "Missing required column 'cnt' in day.csv");

        let empty = DashError::empty_input("by-month aggregation");
        assert_eq!(empty.to_string(), "No rows available for by-month aggregation");

        let config_error = DashError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));
    }

    #[test]
    fn test_data_error_display_includes_line() {
        let error = DashError::data_at_line("bad value in column 'cnt'", 7);
        assert_eq!(
            error.to_string(),
            "Data error at line 7: bad value in column 'cnt'"
        );

        let error = DashError::data("totals do not add up");
        assert_eq!(error.to_string(), "Data error: totals do not add up");
    }

    #[test]
    fn test_error_with_source() {
        let config_source_error = DashError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error
            .to_string()
            .contains("Config loading failed"));
        assert!(config_source_error.source().is_some());

        let graph_error = DashError::graph_with_source(
            "Chart failed",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(graph_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DashError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let error: DashError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_csv_error_conversion_keeps_line() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(std::result::Result::err)
            .expect("ragged row should fail");

        let error: DashError = err.into();
        match error {
            DashError::Data { line, source, .. } => {
                assert_eq!(line, Some(3));
                assert!(source.is_some());
            }
            other => panic!("expected data error, got {other:?}"),
        }
    }
}
