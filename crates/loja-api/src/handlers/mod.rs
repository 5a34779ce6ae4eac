//! Resource handlers.
//!
//! One module per resource, each a set of free functions over [`Api`]. The
//! field names and human-readable messages are the Portuguese wire contract
//! the service has always spoken; the internals are the domain crates.

pub(crate) mod cart_lines;
pub(crate) mod customers;
pub(crate) mod products;
pub(crate) mod purchases;

use serde_json::Value;

/// Non-empty string field, if the key is present.
pub(crate) fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Integer field, if the key is present and integral.
pub(crate) fn int_field(body: &Value, key: &str) -> Option<i64> {
    body.get(key).and_then(Value::as_i64)
}

/// Numeric field as f64, if the key is present.
pub(crate) fn num_field(body: &Value, key: &str) -> Option<f64> {
    body.get(key).and_then(Value::as_f64)
}
