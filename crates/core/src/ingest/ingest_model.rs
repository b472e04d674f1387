use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::decimal_input::DecimalInput;

/// Counts of everything the parsing boundary had to repair or drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Records accepted into the domain model
    pub records_read: usize,
    /// Records that were not JSON objects of the expected shape
    pub rejected_records: usize,
    /// Fields present but of the wrong type or unparseable, replaced by a
    /// default or converted
    pub coerced_fields: usize,
    /// Records kept without a usable date
    pub undated_records: usize,
    /// Ledger events whose kind tag is not recognised
    pub unknown_kinds: usize,
}

impl IngestReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a lenient decimal, recording a coercion when the value was
    /// present but malformed.
    pub fn coerce(&mut self, input: &DecimalInput, field: &str) -> Decimal {
        match input.resolve() {
            Ok(value) => value,
            Err(reason) => {
                warn!("Coercing field '{}' to zero: {}", field, reason);
                self.coerced_fields += 1;
                Decimal::ZERO
            }
        }
    }

    /// Reads a text field. Non-string scalars and containers are kept as
    /// their JSON text and recorded as coerced; `null` or absent is `None`.
    pub fn coerce_text(&mut self, value: Option<Value>, field: &str) -> Option<String> {
        match value? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => {
                warn!("Coercing field '{}' to text: {}", field, other);
                self.coerced_fields += 1;
                Some(other.to_string())
            }
        }
    }

    /// Reads a boolean flag, accepting `"true"`/`"false"` and `0`/`1`.
    /// Anything else is recorded as coerced and treated as absent.
    pub fn coerce_flag(&mut self, value: Option<Value>, field: &str) -> Option<bool> {
        let parsed = match value? {
            Value::Bool(b) => return Some(b),
            Value::Null => return None,
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            _ => None,
        };
        warn!("Coercing field '{}' to a flag: {:?}", field, parsed);
        self.coerced_fields += 1;
        parsed
    }

    pub fn merge(&mut self, other: &IngestReport) {
        self.records_read += other.records_read;
        self.rejected_records += other.rejected_records;
        self.coerced_fields += other.coerced_fields;
        self.undated_records += other.undated_records;
        self.unknown_kinds += other.unknown_kinds;
    }

    /// True when every record parsed without repair.
    pub fn is_clean(&self) -> bool {
        self.rejected_records == 0
            && self.coerced_fields == 0
            && self.undated_records == 0
            && self.unknown_kinds == 0
    }

    /// Emits a single warning summarising repairs, if there were any.
    pub fn log_summary(&self, source: &str) {
        if self.is_clean() {
            return;
        }
        warn!(
            "{}: read {} records, rejected {}, coerced {} fields, {} undated, {} unknown kinds",
            source,
            self.records_read,
            self.rejected_records,
            self.coerced_fields,
            self.undated_records,
            self.unknown_kinds
        );
    }
}
