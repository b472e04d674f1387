mod referrals_model;

pub use referrals_model::*;
