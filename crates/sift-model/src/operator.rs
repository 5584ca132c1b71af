//! Comparison operators and compound logic.
//!
//! Authors type operators the way spreadsheet users write them (`≥`, `>=`,
//! `Not equal to`, ...). Parsing accepts all of those spellings; display
//! always uses the canonical symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// Equal to.
    Eq,
    /// Not equal to.
    Neq,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal to.
    Gte,
    /// Less than or equal to.
    Lte,
}

impl Operator {
    /// All operators in display order.
    pub const ALL: [Operator; 6] = [
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
        Operator::Neq,
        Operator::Gte,
        Operator::Lte,
    ];

    /// Canonical symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => "≥",
            Operator::Lte => "≤",
        }
    }

    /// Returns true for `Eq` and `Neq`, the only operators defined on text.
    pub fn is_equality(&self) -> bool {
        matches!(self, Operator::Eq | Operator::Neq)
    }

    /// Applies the operator to two numbers.
    pub fn compare(&self, left: f64, right: f64) -> bool {
        match self {
            Operator::Eq => left == right,
            Operator::Neq => left != right,
            Operator::Gt => left > right,
            Operator::Lt => left < right,
            Operator::Gte => left >= right,
            Operator::Lte => left <= right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "=" | "==" | "eq" | "is equal to" | "equal to" => Ok(Operator::Eq),
            "!=" | "<>" | "≠" | "neq" | "not equal to" | "is not equal to"
            | "não é igual a" => Ok(Operator::Neq),
            ">" | "gt" => Ok(Operator::Gt),
            "<" | "lt" => Ok(Operator::Lt),
            ">=" | "≥" | "gte" => Ok(Operator::Gte),
            "<=" | "≤" | "lte" => Ok(Operator::Lte),
            _ => Err(ModelError::UnknownOperator(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// How a rule's primary and secondary comparisons combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompoundLogic {
    /// Both comparisons must hold.
    And,
    /// Either comparison may hold.
    Or,
    /// Inclusive range between the two operands; operators are ignored.
    Between,
}

impl CompoundLogic {
    /// Canonical keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundLogic::And => "AND",
            CompoundLogic::Or => "OR",
            CompoundLogic::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for CompoundLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompoundLogic {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(CompoundLogic::And),
            "OR" => Ok(CompoundLogic::Or),
            "BETWEEN" => Ok(CompoundLogic::Between),
            _ => Err(ModelError::UnknownLogic(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for CompoundLogic {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompoundLogic> for String {
    fn from(logic: CompoundLogic) -> Self {
        logic.as_str().to_string()
    }
}
