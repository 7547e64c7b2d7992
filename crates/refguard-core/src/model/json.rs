//! JSON interop for the value model.
//!
//! Fixture construction (`Value::from_json`) and diagnostic rendering
//! (`Value::to_json`, plus `Serialize` for [`Value`] and [`Key`]). The
//! rendering is deliberately lossy: map keys flatten to their display
//! strings, sets render as arrays, non-finite numbers and cycle revisits
//! become `null`, the same shape the host's own stringifier would produce.

use std::collections::HashSet;

use serde::ser::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::key::Key;
use super::value::Value;

impl Value {
    /// Build a value graph from a JSON document.
    ///
    /// Objects become records, arrays become arrays; every container gets a
    /// fresh reference. Maps and sets have no JSON spelling and are built
    /// with [`Value::map`] / [`Value::set`] directly.
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::array(items.iter().map(Value::from_json)),
            JsonValue::Object(entries) => Value::record(
                entries
                    .iter()
                    .map(|(name, child)| (name.clone(), Value::from_json(child))),
            ),
        }
    }

    /// Render the value as a JSON document.
    pub fn to_json(&self) -> JsonValue {
        let mut visited = HashSet::new();
        to_json_inner(self, &mut visited)
    }
}

// Integral values render as JSON integers so that a `from_json` round trip
// compares equal to its source document.
fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n == n.trunc() && n.abs() <= 9.007_199_254_740_992e15 {
        if n < 0.0 {
            JsonValue::Number((n as i64).into())
        } else {
            JsonValue::Number((n as u64).into())
        }
    } else {
        serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

fn to_json_inner(value: &Value, visited: &mut HashSet<usize>) -> JsonValue {
    if let Some(addr) = value.container_addr() {
        if !visited.insert(addr) {
            return JsonValue::Null;
        }
    }
    let rendered = match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Record(cells) => {
            let mut object = serde_json::Map::new();
            for (name, child) in cells.borrow().iter() {
                object.insert(name.clone(), to_json_inner(child, visited));
            }
            JsonValue::Object(object)
        }
        Value::Array(items) | Value::Set(items) => JsonValue::Array(
            items
                .borrow()
                .iter()
                .map(|child| to_json_inner(child, visited))
                .collect(),
        ),
        Value::Map(entries) => {
            let mut object = serde_json::Map::new();
            for (key, child) in entries.borrow().iter() {
                object.insert(key.to_string(), to_json_inner(child, visited));
            }
            JsonValue::Object(object)
        }
    };
    if let Some(addr) = value.container_addr() {
        visited.remove(&addr);
    }
    rendered
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Str(s) => serializer.serialize_str(s),
            Key::Value(value) => value.to_json().serialize(serializer),
        }
    }
}
