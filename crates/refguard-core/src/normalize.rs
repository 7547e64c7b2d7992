//! Container normalization
//!
//! Converts every traversable container shape into one ordered `key ->
//! child` view, so the snapshotter and detector never branch on container
//! kind themselves. Keys follow the shape:
//!
//! - records: own field names, insertion order (key-set equality is the
//!   contract callers rely on, not key order)
//! - arrays: string-ized indices `"0"`, `"1"`, ... in index order
//! - maps: the map's own keys, unmodified (string keys canonicalize)
//! - sets: string-ized positional indices **at iteration time**; removing
//!   an earlier element shifts the reported position of every later one

use hashlink::LinkedHashMap;

use crate::errors::{RefguardError, Result};
use crate::model::{join_path, Key, Value};

/// Normalize one container into an ordered `key -> child` map.
///
/// The returned children are shared handles (reference copies), so the
/// borrow on the container's cell is released before any recursion happens.
///
/// `path` is diagnostic context for the failure case only.
///
/// # Errors
///
/// `UnsupportedContainer` — the value is not one of the four container
/// kinds. Reaching this means the leaf policy declined to classify a
/// primitive as a leaf, which is a contract violation on the caller's
/// side; the engine fails fast instead of silently treating the value as
/// atomic.
pub fn normalize(value: &Value, path: &[Key]) -> Result<LinkedHashMap<Key, Value>> {
    let mut entries = LinkedHashMap::new();
    match value {
        Value::Record(cells) => {
            for (name, child) in cells.borrow().iter() {
                entries.insert(Key::Str(name.clone()), child.clone());
            }
        }
        Value::Array(items) => {
            for (position, child) in items.borrow().iter().enumerate() {
                entries.insert(Key::index(position), child.clone());
            }
        }
        Value::Map(map) => {
            for (key, child) in map.borrow().iter() {
                entries.insert(key.clone(), child.clone());
            }
        }
        Value::Set(items) => {
            for (position, child) in items.borrow().iter().enumerate() {
                entries.insert(Key::index(position), child.clone());
            }
        }
        other => {
            return Err(RefguardError::UnsupportedContainer {
                kind: other.kind(),
                path: join_path(path),
            });
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_are_field_names_in_insertion_order() {
        let record = Value::record([("b", Value::from(1)), ("a", Value::from(2))]);
        let entries = normalize(&record, &[]).unwrap();
        let keys: Vec<String> = entries.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn array_keys_are_stringized_indices() {
        let array = Value::array([Value::from("x"), Value::from("y")]);
        let entries = normalize(&array, &[]).unwrap();
        let keys: Vec<Key> = entries.keys().cloned().collect();
        assert_eq!(keys, [Key::index(0), Key::index(1)]);
    }

    #[test]
    fn map_keys_are_carried_unmodified() {
        let map = Value::map([
            (Value::from("bar"), Value::from(9000)),
            (Value::Number(1.0), Value::from("one")),
        ]);
        let entries = normalize(&map, &[]).unwrap();
        assert!(entries.contains_key(&Key::from("bar")));
        assert!(entries.contains_key(&Key::Value(Value::Number(1.0))));
    }

    #[test]
    fn set_keys_are_positions_at_iteration_time() {
        let set = Value::set([Value::from("a"), Value::from("b")]);
        let entries = normalize(&set, &[]).unwrap();
        assert!(entries.get(&Key::index(0)).unwrap().identical(&Value::from("a")));

        // Removing the first element shifts the later one down a slot.
        set.as_set().unwrap().borrow_mut().remove(0);
        let entries = normalize(&set, &[]).unwrap();
        assert!(entries.get(&Key::index(0)).unwrap().identical(&Value::from("b")));
        assert!(!entries.contains_key(&Key::index(1)));
    }

    #[test]
    fn primitives_fail_fast() {
        let err = normalize(&Value::from(1), &[Key::from("foo")]).unwrap_err();
        assert_eq!(
            err,
            RefguardError::UnsupportedContainer {
                kind: "number",
                path: "foo".to_string(),
            }
        );
    }
}
