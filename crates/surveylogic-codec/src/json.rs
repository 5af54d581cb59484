//! Wire-format helpers
//!
//! Small utilities for reading and building the JSON shapes used by the
//! expression format.

use serde_json::{Map, Value};

/// Key of a field reference object
pub const VAR_KEY: &str = "var";

/// Build a field reference: `{"var": "<code>"}`
pub fn var(field: &str) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(VAR_KEY.to_string(), Value::String(field.to_string()));
    Value::Object(map)
}

/// Build a single-key object: `{key: value}`
pub fn single(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Extract the field code from a field reference.
///
/// Returns `None` unless `value` is `{"var": "<non-empty string>"}`.
pub fn field_of(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    obj.get(VAR_KEY)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The only entry of a single-key object
pub fn single_entry(obj: &Map<String, Value>) -> Option<(&str, &Value)> {
    if obj.len() != 1 {
        return None;
    }
    obj.iter().next().map(|(k, v)| (k.as_str(), v))
}
