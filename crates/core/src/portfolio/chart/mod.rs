//! Portfolio performance chart.
//!
//! Reconstructs cumulative invested capital, ROI earnings and referral
//! income per calendar day from the live investment list and the ledger,
//! then pins the final point to the authoritative current totals.

mod chart_aggregator;
mod chart_model;

pub use chart_aggregator::*;
pub use chart_model::*;
