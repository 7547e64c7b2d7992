use serde::ser::{Serialize, SerializeMap, Serializer};

use super::key::Key;
use super::path::{join_path, StructuralPath};

/// Outcome of one detection pass
///
/// A tagged variant: the path exists only when a mutation was found. The
/// engine returns this as a plain value; converting a finding into a hard
/// failure or a logged warning is the caller's decision, never the engine's.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// No part of the tracked structure was written through an old reference.
    Clean,
    /// First detected violation, with the structural path to it.
    Mutated { path: StructuralPath },
}

impl MutationResult {
    pub fn is_mutated(&self) -> bool {
        matches!(self, MutationResult::Mutated { .. })
    }

    /// Path of the first violation, if any.
    pub fn path(&self) -> Option<&[Key]> {
        match self {
            MutationResult::Clean => None,
            MutationResult::Mutated { path } => Some(path),
        }
    }

    /// Dot-joined path of the first violation, if any.
    pub fn joined_path(&self) -> Option<String> {
        self.path().map(join_path)
    }
}

impl Serialize for MutationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MutationResult::Clean => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("mutated", &false)?;
                map.end()
            }
            MutationResult::Mutated { path } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("mutated", &true)?;
                map.serialize_entry("path", path)?;
                map.end()
            }
        }
    }
}
