use thiserror::Error;

/// Result type alias using RefguardError
pub type Result<T> = std::result::Result<T, RefguardError>;

/// Error taxonomy for the mutation-detection engine
///
/// Mutation findings are *not* errors; they come back as
/// [`MutationResult`](crate::model::MutationResult) values. Errors are
/// reserved for programming-contract violations between the caller's leaf
/// policy and the container normalizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RefguardError {
    /// The leaf policy refused to classify a value as a leaf, but the value
    /// has no container shape the normalizer can traverse.
    #[error("cannot traverse non-container value of kind `{kind}` at path `{path}`")]
    UnsupportedContainer { kind: &'static str, path: String },
}

impl RefguardError {
    /// Stable error code for programmatic handling and log assertions.
    pub fn code(&self) -> &'static str {
        match self {
            RefguardError::UnsupportedContainer { .. } => "ERR_UNSUPPORTED_CONTAINER",
        }
    }
}
