//! Exclusion rule definitions.
//!
//! An [`ExclusionRule`] removes every row where its comparison holds in all
//! of its columns and, when present, its [`ConditionalGate`] also holds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};
use crate::operator::{CompoundLogic, Operator};
use crate::strata::AgeRange;

/// Ordered list of column names a rule applies to.
///
/// Written as `"Hemo.OBSSV; Hemo.OBSSB"`: names are split on `;` and trimmed.
/// A rule with several columns only matches a row when it matches in every
/// listed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnSpec(Vec<String>);

impl ColumnSpec {
    /// Builds a spec from already-split column names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| {
                let column: String = c.into();
                column.trim().to_string()
            })
            .collect();
        if columns.iter().all(String::is_empty) {
            return Err(ModelError::EmptyColumnSpec);
        }
        Ok(Self(columns))
    }

    /// Spec over a single, known-good column name.
    pub(crate) fn single(column: &str) -> Self {
        Self(vec![column.to_string()])
    }

    /// Column names in authoring order.
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    /// Number of named columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed spec; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl FromStr for ColumnSpec {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(';'))
    }
}

impl TryFrom<String> for ColumnSpec {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColumnSpec> for String {
    fn from(spec: ColumnSpec) -> Self {
        spec.to_string()
    }
}

/// One operator applied to one literal operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: Operator,
    /// Raw operand text: a number (decimal comma allowed), text, or `"empty"`.
    pub operand: String,
}

impl Condition {
    pub fn new(operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            operator,
            operand: operand.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.operand)
    }
}

/// Secondary comparison joined to the primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub logic: CompoundLogic,
    pub secondary: Condition,
}

/// Sub-filter restricting a rule to rows of a given age and/or category.
///
/// The age bounds are evaluated on the configured age column, the category
/// on the configured category column. Present clauses are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalGate {
    #[serde(default)]
    pub age: Option<AgeRange>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ConditionalGate {
    pub fn age(range: AgeRange) -> Self {
        Self {
            age: Some(range),
            category: None,
        }
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self {
            age: None,
            category: Some(value.into()),
        }
    }

    #[must_use]
    pub fn with_category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Category value, if one was authored and is not blank.
    pub fn category_value(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

fn enabled_by_default() -> bool {
    true
}

/// A rule that removes matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRule {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub columns: ColumnSpec,
    pub primary: Condition,
    /// Present when the rule is expanded with a secondary comparison.
    #[serde(default)]
    pub compound: Option<Compound>,
    /// Absent when the rule has no condition.
    #[serde(default)]
    pub gate: Option<ConditionalGate>,
}

impl ExclusionRule {
    /// Creates an enabled, unexpanded rule without a gate.
    pub fn new(columns: ColumnSpec, operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            enabled: true,
            columns,
            primary: Condition::new(operator, operand),
            compound: None,
            gate: None,
        }
    }

    /// Parses the column spec and creates a rule; see [`ExclusionRule::new`].
    pub fn on(columns: &str, operator: Operator, operand: impl Into<String>) -> Result<Self> {
        Ok(Self::new(columns.parse()?, operator, operand))
    }

    #[must_use]
    pub fn with_compound(
        mut self,
        logic: CompoundLogic,
        operator: Operator,
        operand: impl Into<String>,
    ) -> Self {
        self.compound = Some(Compound {
            logic,
            secondary: Condition::new(operator, operand),
        });
        self
    }

    #[must_use]
    pub fn with_gate(mut self, gate: ConditionalGate) -> Self {
        self.gate = Some(gate);
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.compound.is_some()
    }

    /// Short human-readable label used in progress and summaries.
    pub fn label(&self) -> String {
        match &self.compound {
            Some(compound) => format!(
                "{} {} {} {}",
                self.columns, self.primary, compound.logic, compound.secondary
            ),
            None => format!("{} {}", self.columns, self.primary),
        }
    }

    /// Checks the authored shape.
    ///
    /// Operand values are not checked for numeric form here: a non-numeric
    /// operand is legal and simply excludes nothing at evaluation time.
    pub fn validate(&self) -> Result<()> {
        if self.columns.columns().iter().all(String::is_empty) {
            return Err(ModelError::EmptyColumnSpec);
        }
        if self.primary.operand.trim().is_empty() {
            return Err(ModelError::MissingOperand {
                columns: self.columns.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_spec_splits_and_trims() {
        let spec: ColumnSpec = " Hemo.OBSSV ;Hemo.OBSSB ".parse().unwrap();
        assert_eq!(spec.columns(), ["Hemo.OBSSV", "Hemo.OBSSB"]);
        assert_eq!(spec.to_string(), "Hemo.OBSSV; Hemo.OBSSB");
    }

    #[test]
    fn column_spec_rejects_blank() {
        assert_eq!("".parse::<ColumnSpec>(), Err(ModelError::EmptyColumnSpec));
        assert_eq!(" ; ".parse::<ColumnSpec>(), Err(ModelError::EmptyColumnSpec));
    }

    #[test]
    fn rule_label_includes_compound() {
        let rule = ExclusionRule::on("GLICOSE.GLI", Operator::Gt, "200")
            .unwrap()
            .with_compound(CompoundLogic::Or, Operator::Lt, "65");
        assert!(rule.is_expanded());
        assert_eq!(rule.label(), "GLICOSE.GLI > 200 OR < 65");
    }

    #[test]
    fn validate_rejects_blank_operand() {
        let rule = ExclusionRule::on("Idade", Operator::Gt, "  ").unwrap();
        assert!(matches!(
            rule.validate(),
            Err(ModelError::MissingOperand { .. })
        ));
    }

    #[test]
    fn gate_category_value_ignores_blank() {
        assert_eq!(ConditionalGate::category("  ").category_value(), None);
        assert_eq!(
            ConditionalGate::category(" F ").category_value(),
            Some("F")
        );
    }
}
