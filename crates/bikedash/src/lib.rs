//! # Bikedash
//!
//! Command line bike rental dashboard.
//!
//! This is the main binary crate that loads the configuration and datasets,
//! computes the dashboard for the requested date range, prints the report
//! and writes the charts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;
pub mod report;

pub use app::*;
pub use cli::*;
pub use error::*;
pub use report::*;
