//! Deep structural copy
//!
//! Rebuilds every traversable container with a fresh reference while
//! leaving leaves (per policy) untouched. Collaborators use this to
//! produce the legitimate "replacement" side of a detection window, and
//! tests use it for the replacement-is-not-mutation property.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use hashlink::LinkedHashMap;

use crate::model::{Key, Value};
use crate::policy::LeafPolicy;

/// Deep-copy a value under a leaf policy.
///
/// Visited containers are memoized by address, so shared substructure
/// stays shared in the copy and reference cycles close onto the copied
/// container rather than recursing.
pub fn copy_value(policy: &dyn LeafPolicy, value: &Value) -> Value {
    let mut memo: HashMap<usize, Value> = HashMap::new();
    copy_node(policy, value, &mut memo)
}

fn copy_node(policy: &dyn LeafPolicy, value: &Value, memo: &mut HashMap<usize, Value>) -> Value {
    if policy.is_leaf(value) {
        return value.clone();
    }
    let Some(addr) = value.container_addr() else {
        // Policy refused a primitive; nothing to rebuild.
        return value.clone();
    };
    if let Some(copied) = memo.get(&addr) {
        return copied.clone();
    }

    // The fresh container is memoized *before* children are copied, so a
    // cycle edge lands on the copy.
    match value {
        Value::Record(cells) => {
            let fresh = Rc::new(RefCell::new(LinkedHashMap::new()));
            memo.insert(addr, Value::Record(fresh.clone()));
            let entries: Vec<(String, Value)> = cells
                .borrow()
                .iter()
                .map(|(name, child)| (name.clone(), child.clone()))
                .collect();
            for (name, child) in entries {
                let copied = copy_node(policy, &child, memo);
                fresh.borrow_mut().insert(name, copied);
            }
            Value::Record(fresh)
        }
        Value::Array(items) => {
            let fresh = Rc::new(RefCell::new(Vec::new()));
            memo.insert(addr, Value::Array(fresh.clone()));
            let children: Vec<Value> = items.borrow().clone();
            for child in children {
                let copied = copy_node(policy, &child, memo);
                fresh.borrow_mut().push(copied);
            }
            Value::Array(fresh)
        }
        Value::Map(map) => {
            let fresh = Rc::new(RefCell::new(LinkedHashMap::new()));
            memo.insert(addr, Value::Map(fresh.clone()));
            let entries: Vec<(Key, Value)> = map
                .borrow()
                .iter()
                .map(|(key, child)| (key.clone(), child.clone()))
                .collect();
            for (key, child) in entries {
                let copied_key = match &key {
                    Key::Str(_) => key.clone(),
                    Key::Value(key_value) => Key::from_value(&copy_node(policy, key_value, memo)),
                };
                let copied = copy_node(policy, &child, memo);
                fresh.borrow_mut().insert(copied_key, copied);
            }
            Value::Map(fresh)
        }
        Value::Set(items) => {
            let fresh = Rc::new(RefCell::new(Vec::new()));
            memo.insert(addr, Value::Set(fresh.clone()));
            let children: Vec<Value> = items.borrow().clone();
            for child in children {
                let copied = copy_node(policy, &child, memo);
                fresh.borrow_mut().push(copied);
            }
            Value::Set(fresh)
        }
        // Primitives returned above.
        primitive => primitive.clone(),
    }
}
