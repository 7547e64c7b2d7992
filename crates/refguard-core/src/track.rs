//! Snapshotter
//!
//! Walks a value once at window start and records, for every traversed
//! node, the exact reference held at that moment plus the key-indexed
//! child structure. The resulting tree is read-only history: detection
//! reads it, nothing ever writes it.

use std::collections::HashSet;

use hashlink::LinkedHashMap;

use crate::errors::{RefguardError, Result};
use crate::filter::IgnoreSet;
use crate::model::{join_path, Key, Value};
use crate::normalize::normalize;
use crate::policy::LeafPolicy;

/// One node of the tracked tree
///
/// `children` is present iff the value was traversed: absent for leaves
/// (per policy) and for containers revisited on their own path (cycle
/// cut, see [`track_value`]).
#[derive(Debug, Clone)]
pub struct TrackedNode {
    value: Value,
    children: Option<LinkedHashMap<Key, TrackedNode>>,
}

impl TrackedNode {
    /// The reference held at snapshot time.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Child nodes keyed by normalized key, if this node was traversed.
    pub fn children(&self) -> Option<&LinkedHashMap<Key, TrackedNode>> {
        self.children.as_ref()
    }
}

/// Snapshot a value into a tracked tree.
///
/// Ignored paths are not descended into: no history is built for them and
/// no later detection covers them. That is the ignore contract; it trades
/// coverage for silence on subtrees with known-external mutation sources.
///
/// A container encountered again on its own path (a reference cycle) is
/// recorded without children, cutting the walk; the same cut is applied
/// symmetrically during detection.
///
/// # Errors
///
/// `UnsupportedContainer` — the policy declined to treat a primitive as a
/// leaf (see [`normalize`](crate::normalize::normalize)).
pub fn track_value(
    policy: &dyn LeafPolicy,
    ignore: &IgnoreSet,
    value: &Value,
) -> Result<TrackedNode> {
    let mut path = Vec::new();
    let mut visited = HashSet::new();
    track_node(policy, ignore, value, &mut path, &mut visited)
}

fn track_node(
    policy: &dyn LeafPolicy,
    ignore: &IgnoreSet,
    value: &Value,
    path: &mut Vec<Key>,
    visited: &mut HashSet<usize>,
) -> Result<TrackedNode> {
    if policy.is_leaf(value) {
        return Ok(TrackedNode {
            value: value.clone(),
            children: None,
        });
    }

    if let Some(addr) = value.container_addr() {
        if !visited.insert(addr) {
            // Cycle: record the reference, cut the descent.
            return Ok(TrackedNode {
                value: value.clone(),
                children: None,
            });
        }

        let entries = normalize(value, path)?;
        let mut children = LinkedHashMap::new();
        for (key, child) in entries {
            path.push(key.clone());
            if !ignore.is_ignored(path) {
                let node = track_node(policy, ignore, &child, path, visited)?;
                children.insert(key, node);
            }
            path.pop();
        }
        visited.remove(&addr);

        Ok(TrackedNode {
            value: value.clone(),
            children: Some(children),
        })
    } else {
        // Not a leaf per policy, not a container: contract violation.
        Err(RefguardError::UnsupportedContainer {
            kind: value.kind(),
            path: join_path(path),
        })
    }
}
