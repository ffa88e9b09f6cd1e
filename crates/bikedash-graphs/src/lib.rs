//! # Bikedash Graphs
//!
//! Record store, CSV loading, date range filtering, grouped aggregation and
//! chart rendering for the bike rental dashboard.
//!
//! Data flows one way: [`DataLoader`] fills a [`RecordStore`], a
//! [`DashboardPipeline`] turns an interval into a [`DashboardSnapshot`], and the
//! [`ChartManager`] paints the snapshot with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod data_loader;
pub mod filter;
pub mod manager;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod traits;
pub mod utils;

// Chart implementations
pub mod daily_rentals;
pub mod rentals_by_hour;
pub mod rentals_by_month;
pub mod rentals_by_season;
pub mod rentals_by_year;
pub mod user_types;

pub use aggregator::*;
pub use daily_rentals::*;
pub use data_loader::*;
pub use filter::*;
pub use manager::*;
pub use pipeline::*;
pub use rentals_by_hour::*;
pub use rentals_by_month::*;
pub use rentals_by_season::*;
pub use rentals_by_year::*;
pub use store::*;
pub use summary::*;
pub use traits::*;
pub use user_types::*;
pub use utils::*;
