//! Revenue-by-location reports from a sales-order CSV export.
//!
//! The pipeline is: [`loader`] reads the table and runs each row through
//! [`validate`], the resulting orders go into an [`repository::OrderRepository`],
//! and [`aggregate`] / [`reports`] derive the ranked table, the annual summary
//! and the two chart series on demand. [`session::Dashboard`] ties these
//! together around the current year and location-pair selections.
pub mod aggregate;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod reports;
pub mod repository;
pub mod session;
pub mod types;
pub mod util;
pub mod validate;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use session::{Dashboard, YearReports};
pub use types::{ComparisonSeries, Order, PieSeries, RankedRow, RevenueTable, YearSummary};
