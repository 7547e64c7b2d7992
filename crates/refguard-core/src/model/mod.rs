//! Core data model: dynamically shaped values, path keys, and results.

pub mod json;
pub mod key;
pub mod path;
pub mod result;
pub mod value;

pub use key::Key;
pub use path::{join_path, StructuralPath};
pub use result::MutationResult;
pub use value::Value;
