pub mod chart;
pub mod positions;
pub mod totals;
