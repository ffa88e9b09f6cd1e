//! # Bikedash Common
//!
//! Shared types, errors, and helpers for the bike rental dashboard.
//!
//! This crate provides the record types both datasets are loaded into, the
//! date interval used to narrow the daily set, the workspace error type, and
//! the logging bootstrap used by the binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{DashError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
