//! Lenient decimal input for loosely-typed backend payloads.
//!
//! Monetary fields may arrive as JSON numbers, numeric strings, `null`, or
//! not at all. `DecimalInput` captures whatever arrived so the parsing
//! boundary can decide between a real value, a missing value (zero) and a
//! malformed value (zero, flagged).

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(Number),
    String(String),
    #[default]
    Missing,
    Other(Value),
}

fn parse_decimal_value(value: &str) -> Result<Decimal, String> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
}

impl DecimalInput {
    /// Resolves the input to a decimal.
    ///
    /// Missing values and empty strings resolve to zero. Anything that is
    /// present but not numeric is an error carrying a description.
    pub fn resolve(&self) -> Result<Decimal, String> {
        match self {
            DecimalInput::Missing => Ok(Decimal::ZERO),
            DecimalInput::Number(n) => parse_decimal_value(&n.to_string()),
            DecimalInput::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
            DecimalInput::String(s) => parse_decimal_value(s),
            DecimalInput::Other(v) => Err(format!("Invalid decimal value type: {}", v)),
        }
    }
}
