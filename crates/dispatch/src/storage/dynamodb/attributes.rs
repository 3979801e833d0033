//! Typed reads and writes of individual DynamoDB attributes.
//!
//! Readers return `Ok(None)` for an absent or null attribute and `Err` with a
//! message when the attribute has the wrong type or an unparsable number.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

pub type Item = HashMap<String, AttributeValue>;

fn present<'a>(item: &'a Item, key: &str) -> Option<&'a AttributeValue> {
    item.get(key).filter(|v| !v.is_null())
}

fn invalid(key: &str) -> String {
    format!("Invalid field type: {key}")
}

pub fn optional_string(item: &Item, key: &str) -> Result<Option<String>, String> {
    present(item, key)
        .map(|v| v.as_s().map(|s| s.to_string()).map_err(|_| invalid(key)))
        .transpose()
}

pub fn optional_f64(item: &Item, key: &str) -> Result<Option<f64>, String> {
    present(item, key)
        .map(|v| {
            let raw = v.as_n().map_err(|_| invalid(key))?;
            raw.parse::<f64>()
                .map_err(|e| format!("Invalid number {key}: {e}"))
        })
        .transpose()
}

/// Reads a whole number of minutes. Fractions are truncated with a warning.
pub fn optional_minutes(item: &Item, key: &str) -> Result<Option<u32>, String> {
    optional_f64(item, key)?
        .map(|value| {
            if !(value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX)) {
                return Err(format!("Out of range {key}: {value}"));
            }
            if value.fract() != 0.0 {
                tracing::warn!(field = %key, value, "Fractional minutes truncated");
            }
            Ok(value.trunc() as u32)
        })
        .transpose()
}

pub fn number(value: impl ToString) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// A number, or an explicit null when absent.
pub fn optional_number(value: Option<f64>) -> AttributeValue {
    match value {
        Some(v) => number(v),
        None => AttributeValue::Null(true),
    }
}
