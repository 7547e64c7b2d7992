use super::key::Key;

/// Ordered sequence of keys locating a node from the root.
///
/// Two paths are equal iff element-wise equal in order and length.
pub type StructuralPath = Vec<Key>;

/// Dot-join a path into its canonical string form.
///
/// This is the form ignore specifications are matched against and the form
/// collaborators embed in diagnostics.
pub fn join_path(path: &[Key]) -> String {
    let mut joined = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            joined.push('.');
        }
        joined.push_str(&key.to_string());
    }
    joined
}
