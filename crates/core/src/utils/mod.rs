pub mod decimal_input;
pub mod decimal_utils;
pub mod time_utils;
