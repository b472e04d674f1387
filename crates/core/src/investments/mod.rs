//! Investment positions and the investment ledger.

mod investments_model;
mod ledger_model;

pub use investments_model::*;
pub use ledger_model::*;
