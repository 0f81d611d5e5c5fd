//! Request field collections.
//!
//! A [`Payload`] is the set of fields sent with a single endpoint call. The same
//! payload can be encoded as a URL-encoded form, a JSON object, or the scalar
//! fields of a multipart upload; the encoding is chosen by the endpoint, not by
//! the payload.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous value under the same key.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a field only when a value is present.
    pub fn with_opt<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object body.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Flattens the fields into name/value pairs for form and multipart bodies.
    ///
    /// Null values are omitted. Strings are sent verbatim, other scalars use
    /// their JSON text, and nested values are sent as compact JSON.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| form_value(value).map(|value| (key.clone(), value)))
            .collect()
    }
}

fn form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
