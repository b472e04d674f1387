mod positions_model;

pub use positions_model::*;
