//! Strict field access over JSON records.
//!
//! Every accessor fails with the offending key name; a missing or
//! mistyped field is never defaulted.

use serde_json::{Map, Value};

use crate::StateError;

/// Parse a top-level record from text.
pub fn parse_record(text: &str) -> Result<Map<String, Value>, StateError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StateError::WrongKind {
            key: "<root>".into(),
            expected: "record",
        }),
    }
}

/// View a nested value as a record.
pub fn as_record(value: &Value) -> Result<&Map<String, Value>, StateError> {
    value.as_object().ok_or_else(|| StateError::WrongKind {
        key: "<record>".into(),
        expected: "record",
    })
}

/// Fetch a required key.
pub fn get_value<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, StateError> {
    obj.get(key).ok_or_else(|| StateError::MissingKey {
        key: key.to_string(),
    })
}

pub fn get_str(obj: &Map<String, Value>, key: &str) -> Result<String, StateError> {
    match get_value(obj, key)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(wrong_kind(key, "string")),
    }
}

/// Nullable string; JSON `null` round-trips as `None`.
pub fn get_opt_str(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, StateError> {
    match get_value(obj, key)? {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        _ => Err(wrong_kind(key, "string or null")),
    }
}

pub fn get_i32(obj: &Map<String, Value>, key: &str) -> Result<i32, StateError> {
    let n = match get_value(obj, key)? {
        Value::Number(n) => n.as_i64().ok_or_else(|| wrong_kind(key, "integer"))?,
        _ => return Err(wrong_kind(key, "integer")),
    };
    i32::try_from(n).map_err(|_| wrong_kind(key, "integer"))
}

pub fn get_f32(obj: &Map<String, Value>, key: &str) -> Result<f32, StateError> {
    match get_value(obj, key)? {
        Value::Number(n) => n
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| wrong_kind(key, "number")),
        _ => Err(wrong_kind(key, "number")),
    }
}

pub fn get_bool(obj: &Map<String, Value>, key: &str) -> Result<bool, StateError> {
    match get_value(obj, key)? {
        Value::Bool(b) => Ok(*b),
        _ => Err(wrong_kind(key, "boolean")),
    }
}

pub fn get_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, StateError> {
    match get_value(obj, key)? {
        Value::Array(items) => Ok(items),
        _ => Err(wrong_kind(key, "array")),
    }
}

/// Unknown fields fail loudly; a record may only carry keys from its
/// declared set.
pub fn reject_unknown(obj: &Map<String, Value>, allowed: &[&str]) -> Result<(), StateError> {
    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(StateError::UnknownKey { key: key.clone() });
        }
    }
    Ok(())
}

fn wrong_kind(key: &str, expected: &'static str) -> StateError {
    StateError::WrongKind {
        key: key.to_string(),
        expected,
    }
}
