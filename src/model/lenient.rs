//! Tolerant field decoders for backend JSON.
//!
//! The backend is not strict about field types (numbers arrive as strings,
//! flags as 0/1), so every optional field goes through one of these and
//! decodes to `None` instead of failing the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

pub fn uint<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(uint_from_value(&Value::deserialize(deserializer)?))
}

pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn uint_from_value(value: &Value) -> Option<u64> {
    let float = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
            n.as_f64()?
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (float.is_finite() && float >= 0.0).then(|| float.round() as u64)
}

/// Narrow a decoded count to `u32`, saturating instead of wrapping.
pub fn to_u32(value: Option<u64>) -> u32 {
    value.map(|v| v.min(u32::MAX as u64) as u32).unwrap_or(0)
}
