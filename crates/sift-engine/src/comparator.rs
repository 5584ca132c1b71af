//! Single-operator comparison of a column against an operand.
//!
//! The comparator never fails: anything it cannot evaluate selects no rows.

use polars::prelude::Column;
use sift_common::{
    is_empty_sentinel, is_missing, normalize_literal, normalize_text, parse_number, to_number,
};
use sift_model::Operator;

use crate::data_utils::cell;
use crate::mask::Mask;

/// An operand literal, classified once before a column is scanned.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// The `"empty"` sentinel: test for missing or blank cells.
    Empty,
    /// A numeric literal (decimal comma accepted).
    Number(f64),
    /// Any other text, normalized for case-insensitive equality.
    Text(String),
}

impl Operand {
    pub fn parse(literal: &str) -> Self {
        if is_empty_sentinel(literal) {
            Operand::Empty
        } else if let Some(number) = parse_number(literal) {
            Operand::Number(number)
        } else {
            Operand::Text(normalize_literal(literal))
        }
    }

    /// Text operand compared verbatim, even if it looks like a number.
    pub fn text(literal: &str) -> Self {
        Operand::Text(normalize_literal(literal))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if `operator` has a meaning for this operand.
    pub fn supports(&self, operator: Operator) -> bool {
        match self {
            Operand::Number(_) => true,
            Operand::Empty | Operand::Text(_) => operator.is_equality(),
        }
    }
}

/// Evaluates `cell <operator> operand` for every row of `column`.
pub fn compare(column: &Column, operator: Operator, operand: &Operand) -> Mask {
    let len = column.len();
    match operand {
        Operand::Empty => match operator {
            Operator::Eq => Mask::from_fn(len, |idx| is_missing(cell(column, idx))),
            Operator::Neq => Mask::from_fn(len, |idx| !is_missing(cell(column, idx))),
            _ => Mask::all_false(len),
        },
        Operand::Text(expected) => match operator {
            Operator::Eq => Mask::from_fn(len, |idx| normalize_text(cell(column, idx)) == *expected),
            Operator::Neq => {
                Mask::from_fn(len, |idx| normalize_text(cell(column, idx)) != *expected)
            }
            _ => Mask::all_false(len),
        },
        Operand::Number(expected) => Mask::from_fn(len, |idx| {
            to_number(cell(column, idx)).is_some_and(|value| operator.compare(value, *expected))
        }),
    }
}

/// Inclusive range test; the bounds may be given in either order.
pub fn between(column: &Column, first: f64, second: f64) -> Mask {
    let (low, high) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    Mask::from_fn(column.len(), |idx| {
        to_number(cell(column, idx)).is_some_and(|value| low <= value && value <= high)
    })
}
