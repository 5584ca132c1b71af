//! Exclusion rule evaluation.
//!
//! A rule produces a mask where `true` means "exclude this row". The mask is
//! the AND of the rule's comparison across every named column, further
//! restricted by the rule's optional condition on age and category.

use polars::prelude::{Column, DataFrame};
use sift_common::parse_number;
use sift_model::{
    AgeRange, CompoundLogic, Condition, ConditionalGate, ExclusionRule, GlobalConfig, Operator,
};

use crate::comparator::{Operand, between, compare};
use crate::data_utils::{coerce_numeric, has_column};
use crate::error::Result;
use crate::mask::Mask;
use crate::warning::EngineWarning;

/// Exclusion mask for one rule plus whatever was recovered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub mask: Mask,
    pub warnings: Vec<EngineWarning>,
}

impl Evaluation {
    fn new(mask: Mask, warnings: Vec<EngineWarning>) -> Self {
        Self { mask, warnings }
    }
}

/// Coerces the columns a numeric rule reads.
///
/// When the primary operand is a number, every referenced column that
/// exists is rewritten as Float64 in `df`. The age column is coerced too
/// when the rule's condition carries age bounds. Later rules see the
/// coerced values.
pub fn prepare_rule(df: &mut DataFrame, rule: &ExclusionRule, config: &GlobalConfig) -> Result<()> {
    if Operand::parse(&rule.primary.operand).as_number().is_some() {
        for name in rule.columns.columns() {
            if has_column(df, name) && coerce_numeric(df, name)? {
                tracing::debug!(column = %name, "coerced column to numeric");
            }
        }
    }

    let gates_on_age = rule
        .gate
        .as_ref()
        .and_then(|gate| gate.age.as_ref())
        .is_some_and(|range| !range.is_unbounded());
    if gates_on_age && has_column(df, &config.age_column) {
        coerce_numeric(df, &config.age_column)?;
    }
    Ok(())
}

/// Evaluates one rule against the current state of `df`.
///
/// Never fails. A missing column yields an all-false mask, and operands that
/// cannot be used with their operator select nothing; both are reported in
/// [`Evaluation::warnings`].
pub fn evaluate_rule(df: &DataFrame, rule: &ExclusionRule, config: &GlobalConfig) -> Evaluation {
    let height = df.height();
    let mut warnings = Vec::new();

    let mut columns = Vec::with_capacity(rule.columns.len());
    for name in rule.columns.columns() {
        match df.column(name) {
            Ok(column) => columns.push(column),
            Err(_) => {
                warnings.push(EngineWarning::MissingColumn {
                    column: name.clone(),
                });
                return Evaluation::new(Mask::all_false(height), warnings);
            }
        }
    }
    if columns.is_empty() {
        return Evaluation::new(Mask::all_false(height), warnings);
    }

    let test = ColumnTest::plan(rule, &mut warnings);
    let main = columns
        .into_iter()
        .fold(Mask::all_true(height), |mask, column| {
            mask.and(&test.apply(column))
        });

    let gate = gate_mask(df, rule.gate.as_ref(), config, &mut warnings);
    Evaluation::new(main.and(&gate), warnings)
}

/// A comparison resolved to something that can be run against a column.
type Check = (Operator, Operand);

/// Per-column test, classified once per rule.
enum ColumnTest {
    Single(Check),
    And(Check, Check),
    Or(Check, Check),
    Between(f64, f64),
    /// A comparison in the rule cannot be used; the rule selects no rows.
    Nothing,
}

impl ColumnTest {
    fn plan(rule: &ExclusionRule, warnings: &mut Vec<EngineWarning>) -> Self {
        // The sentinel tests presence on its own; any compound is ignored.
        let primary_is_sentinel = matches!(Operand::parse(&rule.primary.operand), Operand::Empty);
        let compound = match &rule.compound {
            Some(compound) if !primary_is_sentinel => compound,
            _ => return check(&rule.primary, warnings).map_or(Self::Nothing, Self::Single),
        };
        match compound.logic {
            CompoundLogic::And | CompoundLogic::Or => {
                let first = check(&rule.primary, warnings);
                let second = check(&compound.secondary, warnings);
                match (first, second, compound.logic) {
                    (Some(first), Some(second), CompoundLogic::And) => Self::And(first, second),
                    (Some(first), Some(second), _) => Self::Or(first, second),
                    _ => Self::Nothing,
                }
            }
            CompoundLogic::Between => {
                let first = parse_number(&rule.primary.operand);
                let second = parse_number(&compound.secondary.operand);
                match (first, second) {
                    (Some(first), Some(second)) => Self::Between(first, second),
                    _ => {
                        warnings.push(EngineWarning::InvalidBetween {
                            first: rule.primary.operand.trim().to_string(),
                            second: compound.secondary.operand.trim().to_string(),
                        });
                        Self::Nothing
                    }
                }
            }
        }
    }

    fn apply(&self, column: &Column) -> Mask {
        match self {
            Self::Single(check) => run(column, check),
            Self::And(first, second) => run(column, first).and(&run(column, second)),
            Self::Or(first, second) => run(column, first).or(&run(column, second)),
            Self::Between(first, second) => between(column, *first, *second),
            Self::Nothing => Mask::all_false(column.len()),
        }
    }
}

fn check(condition: &Condition, warnings: &mut Vec<EngineWarning>) -> Option<Check> {
    let operand = Operand::parse(&condition.operand);
    if operand.supports(condition.operator) {
        Some((condition.operator, operand))
    } else {
        warnings.push(EngineWarning::NonNumericOperand {
            operator: condition.operator,
            operand: condition.operand.trim().to_string(),
        });
        None
    }
}

fn run(column: &Column, (operator, operand): &Check) -> Mask {
    compare(column, *operator, operand)
}

/// Rows the rule's condition admits. Clauses that cannot be evaluated are
/// skipped, so an unusable condition admits every row.
fn gate_mask(
    df: &DataFrame,
    gate: Option<&ConditionalGate>,
    config: &GlobalConfig,
    warnings: &mut Vec<EngineWarning>,
) -> Mask {
    let mut mask = Mask::all_true(df.height());
    let Some(gate) = gate else {
        return mask;
    };

    if let Some(range) = gate.age.as_ref().filter(|range| !range.is_unbounded()) {
        match df.column(&config.age_column) {
            Ok(column) => mask = mask.and(&age_gate(column, range, warnings)),
            Err(_) => warnings.push(EngineWarning::GateColumnMissing {
                column: config.age_column.clone(),
            }),
        }
    }

    if let Some(value) = gate.category_value() {
        match df.column(&config.category_column) {
            Ok(column) => mask = mask.and(&compare(column, Operator::Eq, &Operand::text(value))),
            Err(_) => warnings.push(EngineWarning::GateColumnMissing {
                column: config.category_column.clone(),
            }),
        }
    }

    mask
}

fn age_gate(column: &Column, range: &AgeRange, warnings: &mut Vec<EngineWarning>) -> Mask {
    let mut mask = Mask::all_true(column.len());
    for bound in range.bounds() {
        match parse_number(&bound.value) {
            Some(value) => {
                mask = mask.and(&compare(column, bound.operator, &Operand::Number(value)));
            }
            None => warnings.push(EngineWarning::GateBoundIgnored {
                bound: bound.to_string(),
            }),
        }
    }
    mask
}
