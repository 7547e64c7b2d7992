//! Tracker boundary
//!
//! `MutationTracker` is the surface collaborators hold across one
//! detection window: snapshot at window start, detect at window end, then
//! discard and re-snapshot from the now-current value. The caller owns
//! that cadence and owns turning findings into failures or warnings; the
//! tracker is a pure query either way, so repeated detection calls on an
//! untouched structure return the same result.

use crate::detect;
use crate::errors::Result;
use crate::filter::IgnoreSet;
use crate::model::{MutationResult, Value};
use crate::policy::{DefaultLeafPolicy, LeafPolicy};
use crate::track::{track_value, TrackedNode};
use crate::{log_op_end, log_op_error, log_op_start};

/// Snapshot of one value plus the configuration to re-check it.
pub struct MutationTracker<P: LeafPolicy = DefaultLeafPolicy> {
    policy: P,
    ignore: IgnoreSet,
    root: TrackedNode,
}

impl MutationTracker<DefaultLeafPolicy> {
    /// Snapshot a value with the default leaf policy and no ignored paths.
    ///
    /// # Errors
    ///
    /// `UnsupportedContainer` — cannot occur with the default policy;
    /// present for signature uniformity with [`MutationTracker::with_policy`].
    pub fn track(value: &Value) -> Result<Self> {
        Self::with_policy(DefaultLeafPolicy, IgnoreSet::new(), value)
    }
}

impl<P: LeafPolicy> MutationTracker<P> {
    /// Snapshot a value under a caller-supplied leaf policy and ignore set.
    ///
    /// # Errors
    ///
    /// `UnsupportedContainer` — the policy declined to treat a primitive
    /// as a leaf.
    pub fn with_policy(policy: P, ignore: IgnoreSet, value: &Value) -> Result<Self> {
        log_op_start!("track_value");
        let start = std::time::Instant::now();

        let result = track_value(&policy, &ignore, value);

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!("track_value", duration_ms = elapsed);
            }
            Err(e) => {
                log_op_error!("track_value", e, duration_ms = elapsed);
            }
        }

        Ok(Self {
            policy,
            ignore,
            root: result?,
        })
    }

    /// Check the structure captured at snapshot time for in-place writes.
    ///
    /// Compares the tracked tree against the same root reference it was
    /// built from, so everything reachable from that reference is covered.
    ///
    /// # Errors
    ///
    /// `UnsupportedContainer` — the policy declined to treat a primitive
    /// as a leaf.
    pub fn detect_mutations(&self) -> Result<MutationResult> {
        let current = self.root.value().clone();
        self.detect_against(&current)
    }

    /// Check against an explicitly supplied current value.
    ///
    /// This is the engine as a pure query: collaborators that re-read
    /// their subject between windows (and may have replaced the root
    /// wholesale) pass the fresh reference here.
    ///
    /// # Errors
    ///
    /// `UnsupportedContainer` — the policy declined to treat a primitive
    /// as a leaf.
    pub fn detect_against(&self, current: &Value) -> Result<MutationResult> {
        log_op_start!("detect_mutations");
        let start = std::time::Instant::now();

        let result = detect::detect_mutations(&self.policy, &self.ignore, &self.root, current);

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(outcome) => {
                log_op_end!(
                    "detect_mutations",
                    duration_ms = elapsed,
                    mutated = outcome.is_mutated()
                );
            }
            Err(e) => {
                log_op_error!("detect_mutations", e, duration_ms = elapsed);
            }
        }
        result
    }

    /// The tracked tree built at snapshot time.
    pub fn tracked(&self) -> &TrackedNode {
        &self.root
    }

    /// The ignore set this tracker filters with.
    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }
}
