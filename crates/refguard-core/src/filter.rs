//! Structural path filter
//!
//! Caller-supplied set of dot-joined paths excluded from both snapshotting
//! and detection. Matching is exact string equality on the joined path:
//! ignoring `"foo"` does not ignore `"foo.bar"`, and ignoring `"foo.bar"`
//! does not catch a write to `foo` itself. Entries are not validated; a
//! malformed path string simply never matches anything.

use std::collections::BTreeSet;

use crate::model::{join_path, Key};

/// Set of ignored structural paths, keyed by their dot-joined form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: BTreeSet<String>,
}

impl IgnoreSet {
    /// Empty set; never matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ignore entries.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check whether a concrete path is ignored.
    ///
    /// Evaluated independently at every depth of both walks; the empty set
    /// short-circuits without joining the path.
    pub fn is_ignored(&self, path: &[Key]) -> bool {
        if self.paths.is_empty() {
            return false;
        }
        self.paths.contains(&join_path(path))
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_never_matches() {
        let ignore = IgnoreSet::new();
        assert!(!ignore.is_ignored(&[Key::from("foo")]));
        assert!(!ignore.is_ignored(&[]));
    }

    #[test]
    fn matches_exact_joined_path_only() {
        let ignore: IgnoreSet = ["foo.bar"].into_iter().collect();
        assert!(ignore.is_ignored(&[Key::from("foo"), Key::from("bar")]));
        assert!(!ignore.is_ignored(&[Key::from("foo")]));
        assert!(!ignore.is_ignored(&[
            Key::from("foo"),
            Key::from("bar"),
            Key::from("baz")
        ]));
    }

    #[test]
    fn positional_keys_join_as_digits() {
        let ignore: IgnoreSet = ["items.0"].into_iter().collect();
        assert!(ignore.is_ignored(&[Key::from("items"), Key::index(0)]));
        assert!(!ignore.is_ignored(&[Key::from("items"), Key::index(1)]));
    }

    #[test]
    fn malformed_entries_are_silent_noops() {
        let ignore: IgnoreSet = ["...", "foo..bar", ""].into_iter().collect();
        assert!(!ignore.is_ignored(&[Key::from("foo"), Key::from("bar")]));
    }
}
