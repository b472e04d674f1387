//! Kesfolio Core - Domain models and dashboard aggregation.
//!
//! This crate turns the loosely-typed JSON the backend serves into typed
//! domain models and derives everything the dashboard shows from them:
//! the performance chart series, the summary-card totals and the positions
//! table. It performs no I/O; the `client` crate fetches the inputs.

pub mod constants;
pub mod errors;
pub mod ingest;
pub mod investments;
pub mod portfolio;
pub mod referrals;
pub mod users;
pub mod utils;

// Re-export common types from the domain and portfolio modules
pub use investments::*;
pub use portfolio::chart::{ChartPeriod, ChartPoint, ChartSeries, PortfolioAggregator};
pub use portfolio::positions::PositionRow;
pub use portfolio::totals::PortfolioTotals;
pub use referrals::*;
pub use users::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
