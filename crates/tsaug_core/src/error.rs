//! Error types for tsaug_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while augmenting signals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Signal has an unsupported rank or an empty axis.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Two signals that must share a shape do not.
    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the first signal.
        left: Vec<usize>,
        /// Shape of the second signal.
        right: Vec<usize>,
    },

    /// A parameter is outside the domain where the operator is defined.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A domain transform failed.
    #[error("Transform error: {0}")]
    TransformError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Build a [`CoreError::ShapeMismatch`] from two shape slices.
    #[must_use]
    pub fn shape_mismatch(left: &[usize], right: &[usize]) -> Self {
        Self::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
