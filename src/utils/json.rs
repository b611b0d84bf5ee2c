//! Schema-tolerant access to loosely-typed provider JSON.
//!
//! Provider payloads use inconsistent key casing (`Results` vs `results`) and
//! occasionally the wrong types. These helpers try an ordered list of key
//! spellings and degrade to `None`/empty instead of failing. The text and
//! array variants also pass over empty strings and arrays, so
//! `{"Results": [], "results": [...]}` reads the populated spelling.

use serde_json::{Map, Value};

/// Returns the first non-null value stored under any of `keys`.
///
/// Returns `None` when `value` is not an object or none of the keys is set.
pub fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|candidate| !candidate.is_null())
}

/// Blank values: null, whitespace-only strings and empty arrays.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Returns the first non-blank value stored under any of `keys`.
fn first_populated<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|candidate| !is_blank(candidate))
}

/// Like [`lookup`], but only accepts an object. Empty objects are kept.
pub fn lookup_object<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    lookup(value, keys).and_then(Value::as_object)
}

/// Like [`lookup`], but only accepts a non-empty array; anything else reads as empty.
pub fn lookup_array<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    first_populated(value, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Like [`lookup`], but only accepts a non-blank string, returned trimmed.
pub fn lookup_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    first_populated(value, keys).and_then(Value::as_str).map(str::trim)
}
