//! Dashboard loading.
//!
//! Fetches every dashboard input concurrently and derives the summary
//! cards, chart series and positions table from them in one pass.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::*;
pub use dashboard_service::*;

#[cfg(test)]
mod dashboard_service_tests;
