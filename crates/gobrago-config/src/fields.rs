//! Detection of document keys that no config field consumes.

use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level keys a config type reads, taken from its serialized default.
pub fn known_fields<T: Serialize + Default>() -> Vec<String> {
    match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map.into_iter().map(|(key, _)| key).collect(),
        _ => Vec::new(),
    }
}

/// Keys of `document` that `T` does not know.
pub fn unknown_fields<T: Serialize + Default>(document: &Map<String, Value>) -> Vec<String> {
    let known = known_fields::<T>();
    document
        .keys()
        .filter(|key| !known.contains(*key))
        .cloned()
        .collect()
}
