//! Summary-card totals.
//!
//! Uses the same formulas as the chart's final point so the cards and the
//! chart never disagree on the current numbers.

mod totals_model;

pub use totals_model::*;
