mod users_model;

pub use users_model::*;
