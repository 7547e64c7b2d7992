//! Mutation detector
//!
//! Compares a tracked tree against the live value and returns the first
//! path whose reference changed under an unchanged parent reference, the
//! signature of a write through an old handle. Findings come back as
//! values; the detector itself never raises on a finding and never mutates
//! either the tracked tree or the observed value.

use std::collections::HashSet;

use hashlink::LinkedHashSet;

use crate::errors::Result;
use crate::filter::IgnoreSet;
use crate::model::{Key, MutationResult, Value};
use crate::normalize::normalize;
use crate::policy::LeafPolicy;
use crate::track::TrackedNode;

/// Compare a tracked tree against the current value.
///
/// The root is compared with no parent anchor (`same_parent_ref = false`):
/// a wholesale root replacement is always legitimate, and the first level
/// is only judged through recursion once a reference relation is
/// established at the root itself.
///
/// # Errors
///
/// `UnsupportedContainer` — the policy declined to treat a primitive as a
/// leaf (see [`normalize`](crate::normalize::normalize)).
pub fn detect_mutations(
    policy: &dyn LeafPolicy,
    ignore: &IgnoreSet,
    tracked: &TrackedNode,
    current: &Value,
) -> Result<MutationResult> {
    let mut path = Vec::new();
    let mut visited = HashSet::new();
    detect_node(
        policy,
        ignore,
        Some(tracked),
        Some(current),
        false,
        &mut path,
        &mut visited,
    )
}

/// Identity across possibly-absent sides. Absence (a key present on only
/// one side) is its own value: absent is identical to absent and to
/// nothing else, so deletion and addition both surface as a reference
/// change under an unchanged parent.
fn identical_opt(prev: Option<&Value>, current: Option<&Value>) -> bool {
    match (prev, current) {
        (None, None) => true,
        (Some(a), Some(b)) => a.identical(b),
        _ => false,
    }
}

/// An absent side is always a leaf; present values ask the policy.
fn is_leaf_opt(policy: &dyn LeafPolicy, value: Option<&Value>) -> bool {
    value.map_or(true, |v| policy.is_leaf(v))
}

fn detect_node(
    policy: &dyn LeafPolicy,
    ignore: &IgnoreSet,
    tracked: Option<&TrackedNode>,
    current: Option<&Value>,
    same_parent_ref: bool,
    path: &mut Vec<Key>,
    visited: &mut HashSet<usize>,
) -> Result<MutationResult> {
    let prev = tracked.map(TrackedNode::value);
    let same_ref = identical_opt(prev, current);

    // Core rule, checked before anything else: an unchanged parent
    // reference pins every child reference. A differing child here means
    // someone wrote through the old parent handle.
    if same_parent_ref && !same_ref {
        return Ok(MutationResult::Mutated { path: path.clone() });
    }

    // Leaves cannot hold nested mutation. This must come after the
    // identity check: a leaf replaced by reference was already judged
    // above, under its parent's anchor.
    if is_leaf_opt(policy, prev) || is_leaf_opt(policy, current) {
        return Ok(MutationResult::Clean);
    }

    let (Some(tracked), Some(current)) = (tracked, current) else {
        // Absent sides are leaves; unreachable past the check above.
        return Ok(MutationResult::Clean);
    };

    // Cycle cut, mirroring the snapshotter: a container revisited on its
    // own path is opaque from here down.
    let Some(addr) = current.container_addr() else {
        return normalize(current, path).map(|_| MutationResult::Clean);
    };
    if !visited.insert(addr) {
        return Ok(MutationResult::Clean);
    }

    let entries = normalize(current, path)?;

    // Union of tracked keys and live keys, tracked first. One-sided keys
    // flow through the recursion with an absent side.
    let mut keys_to_detect: LinkedHashSet<Key> = LinkedHashSet::new();
    if let Some(children) = tracked.children() {
        for key in children.keys() {
            keys_to_detect.insert(key.clone());
        }
    }
    for key in entries.keys() {
        keys_to_detect.insert(key.clone());
    }

    for key in keys_to_detect {
        path.push(key.clone());
        if !ignore.is_ignored(path) {
            let child_tracked = tracked.children().and_then(|children| children.get(&key));
            let child_current = entries.get(&key);
            let result = detect_node(
                policy,
                ignore,
                child_tracked,
                child_current,
                same_ref,
                path,
                visited,
            )?;
            if result.is_mutated() {
                return Ok(result);
            }
        }
        path.pop();
    }
    visited.remove(&addr);

    Ok(MutationResult::Clean)
}
