//! The generic value boundary and its helper functions.
//!
//! Everything that crosses the (de)serialization boundary is a
//! [`serde_json::Value`] — a closed null/bool/number/string/sequence/
//! mapping variant. The `preserve_order` feature keeps mapping order
//! equal to insertion order, which the tree relies on: serialized
//! mappings list children in construction order.

/// The generic JSON-like value exchanged by `serialize`/`deserialize`.
pub use serde_json::Value;

/// Parse loosely-typed text data.
///
/// Attempts a JSON parse first; text that is not valid JSON is treated
/// as a raw string scalar rather than an error. This is the tolerant
/// entry point for string-shaped input: `"5"` becomes a number,
/// `"true"` a boolean, `"hello"` stays a string.
pub fn loose_parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Whether a serialized value carries no data.
///
/// Null and empty mappings/sequences count as empty; `Simple`-mode
/// serialization omits entries whose value satisfies this predicate.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Convert a float into a JSON number value.
///
/// Non-finite floats have no JSON representation and map to null.
pub fn number(v: f64) -> Value {
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}
