//! Deserializers for export fields that arrive as either strings or numbers

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept `"12"`, `12` or `null`, yielding a string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Keep a present field verbatim, so an explicit `null` stays distinct from a
/// missing field (which falls back to `None` through `#[serde(default)]`)
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Non-negative integer view of a raw export value (`3`, `"3"`, `3.0`)
pub fn as_u32(value: &Value) -> Option<u32> {
    as_f64(value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let n = n as u32;
            n
        })
}

/// Numeric view of a raw export value (numbers and numeric strings)
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
