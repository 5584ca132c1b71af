//! Non-fatal problems found during a pass.

use std::fmt;

use sift_model::Operator;

/// A recovered problem the caller may want to surface.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineWarning {
    /// A rule names a column the dataset does not have; the rule excluded nothing.
    MissingColumn { column: String },
    /// An ordering operator was paired with a non-numeric operand.
    NonNumericOperand { operator: Operator, operand: String },
    /// BETWEEN needs two numeric operands.
    InvalidBetween { first: String, second: String },
    /// A condition clause refers to a column the dataset does not have.
    GateColumnMissing { column: String },
    /// A condition age bound is not numeric and was ignored.
    GateBoundIgnored { bound: String },
    /// An age range has a non-numeric bound; its stratum was skipped.
    InvalidAgeRule { range: String, value: String },
    /// Two strata got the same name; the later one replaced the earlier one.
    DuplicateStratumName { name: String },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { column } => {
                write!(f, "column '{column}' not found; rule excludes nothing")
            }
            Self::NonNumericOperand { operator, operand } => write!(
                f,
                "operand '{operand}' is not numeric and cannot be used with '{operator}'; \
                 comparison excludes nothing"
            ),
            Self::InvalidBetween { first, second } => write!(
                f,
                "BETWEEN needs two numeric values, got '{first}' and '{second}'; \
                 rule excludes nothing"
            ),
            Self::GateColumnMissing { column } => {
                write!(f, "condition column '{column}' not found; clause ignored")
            }
            Self::GateBoundIgnored { bound } => {
                write!(f, "condition bound '{bound}' is not numeric; bound ignored")
            }
            Self::InvalidAgeRule { range, value } => write!(
                f,
                "age range '{range}' has non-numeric value '{value}'; stratum skipped"
            ),
            Self::DuplicateStratumName { name } => write!(
                f,
                "stratum '{name}' was produced more than once; the later one was kept"
            ),
        }
    }
}
