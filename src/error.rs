//! Error types for easydiffraction-core
//!
//! Construction of experiments never fails; errors come from validation,
//! dataset shape checks, Arrow conversion, and dictionary decoding.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// easydiffraction-core error types
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a value that fails validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Variable values do not match the sizes of its dimensions
    #[error("Shape mismatch for variable '{name}': dimensions require {expected} values, got {actual}")]
    ShapeMismatch {
        /// Variable name
        name: String,
        /// Value count implied by the dimensions
        expected: usize,
        /// Value count supplied
        actual: usize,
    },

    /// Dimension already registered with a different size
    #[error("Dimension '{dim}' already has size {existing}, cannot resize to {requested}")]
    DimensionConflict {
        /// Dimension name
        dim: String,
        /// Size already registered
        existing: usize,
        /// Size requested
        requested: usize,
    },

    /// Dimension is not part of the dataset
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Required key absent from a dictionary export
    #[error("Missing field in experiment dictionary: {0}")]
    MissingField(String),

    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
