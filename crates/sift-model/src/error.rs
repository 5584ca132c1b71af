//! Error types for rule model parsing and validation.

use thiserror::Error;

/// Errors raised while turning authored text into typed rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Operator symbol or label not recognised.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Compound logic keyword not recognised.
    #[error("unknown compound logic '{0}' (expected AND, OR, or BETWEEN)")]
    UnknownLogic(String),

    /// Column specification names no columns.
    #[error("column specification is empty")]
    EmptyColumnSpec,

    /// Primary operand is blank.
    #[error("rule on '{columns}' has no operand")]
    MissingOperand { columns: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownOperator("~".to_string());
        assert_eq!(err.to_string(), "unknown operator '~'");

        let err = ModelError::MissingOperand {
            columns: "Hemo.LEUCO".to_string(),
        };
        assert_eq!(err.to_string(), "rule on 'Hemo.LEUCO' has no operand");
    }
}
