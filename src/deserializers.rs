//! Forgiving coercions for loosely typed request values.
//!
//! Web clients send ages as numbers, numeric strings, or floats from form
//! widgets. These helpers accept all of those while still rejecting junk.

use serde_json::Value;

/// Coerce a JSON value to an integer.
///
/// # Accepted Formats
///
/// * **Integer**: `30`
/// * **Float**: `30.9` → 30 (truncated toward zero)
/// * **String integer**: `"30"`, `" 30 "` → 30
///
/// Strings must hold an integer: `"30.5"` is rejected like any other
/// non-numeric text. Booleans, nulls, arrays and objects yield `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Textual form of a value: strings as-is, everything else as compact JSON
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
