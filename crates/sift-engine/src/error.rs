//! Error types for the evaluation core.

use thiserror::Error;

/// Errors that abort an engine call.
///
/// Per-rule and per-stratum problems are not errors; they are reported as
/// [`crate::EngineWarning`]s and the pass continues.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Configured age column is absent from the dataset.
    #[error("age column '{column}' not found in the dataset")]
    MissingAgeColumn { column: String },

    /// Configured category column is absent from the dataset.
    #[error("category column '{column}' not found in the dataset")]
    MissingCategoryColumn { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for EngineError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
