//! Error types for the AdaFit coaching engine

use thiserror::Error;

/// Raised at the engine boundary when an input field is out of range.
///
/// The derivation engine itself never rejects input; callers validate with
/// [`crate::WorkoutContext::validate`] before deriving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct InvalidContextError {
    /// Wire name of the offending field (e.g. `stressLevel`)
    pub field: String,
    pub message: String,
}

impl InvalidContextError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Profile patch errors
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Patch for `{0}` must be a JSON object")]
    NotAnObject(String),

    #[error("Patch does not match the profile schema: {0}")]
    Schema(#[from] serde_json::Error),
}
