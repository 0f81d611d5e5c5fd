//! Response envelope handling.
//!
//! Docmost answers either with a bare JSON value or with a wrapper of the form
//! `{"data": ..., "success": true, "status": 200}`. Listing endpoints further
//! nest their rows under a collection key (`items`, `members`, ...), which is
//! resolved through the per-endpoint table in [`crate::endpoints`].

use serde_json::Value;

/// Keys that must all be present for a body to count as a wrapper.
pub const ENVELOPE_KEYS: [&str; 3] = ["data", "success", "status"];

/// Returns true when `body` is a mapping carrying every envelope key.
pub fn is_envelope(body: &Value) -> bool {
    match body {
        Value::Object(map) => ENVELOPE_KEYS.iter().all(|key| map.contains_key(*key)),
        _ => false,
    }
}

/// Strips the wrapper from a decoded body.
///
/// Bodies that are not wrappers, including lists, are returned unchanged.
pub fn unwrap_envelope(body: Value) -> Value {
    if !is_envelope(&body) {
        return body;
    }
    match body {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// Finds the rows of a listing response.
///
/// A bare list is its own collection. Otherwise the first key in `keys` that
/// holds a list wins. `None` means the body should be rendered as a record.
pub fn extract_collection<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a [Value]> {
    if let Value::Array(items) = body {
        return Some(items.as_slice());
    }
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}
