//! Per-type coercion of raw JSON values.
//!
//! None of these functions fail: values of the wrong type fall back to the
//! type's default.

use serde_json::Value;

/// Coerces a raw value to a trimmed string.
///
/// - missing or `null` → `""`
/// - strings → trimmed
/// - numbers → their JSON rendering (`42`, `4.5`)
/// - booleans → `"true"` / `"false"`
/// - arrays and objects → compact JSON text
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string().trim().to_string(),
    }
}

/// Coerces a raw value to a finite number.
///
/// - missing, `null`, arrays and objects → `0`
/// - numbers → as given
/// - booleans → `1` / `0`
/// - strings → parsed after trimming; empty, non-numeric or non-finite text → `0`
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    // "inf" and "NaN" parse successfully but cannot be stored
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Passes arrays through unchanged; anything else becomes an empty list.
pub fn coerce_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
