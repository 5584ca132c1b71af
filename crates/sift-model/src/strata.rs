//! Stratification request definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operator::Operator;

/// One side of an age range: an operator and a raw numeric literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub operator: Operator,
    pub value: String,
}

impl Bound {
    pub fn new(operator: Operator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }

    /// A bound with a blank value was left unfilled by the author.
    pub fn is_present(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.value.trim())
    }
}

/// Up to two AND-combined bounds on the age column.
///
/// Bounds keep the order the author wrote them in; which one is the lower
/// limit is only decided when the range is named.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default)]
    pub first: Option<Bound>,
    #[serde(default)]
    pub second: Option<Bound>,
}

impl AgeRange {
    /// A range constrained on one side.
    pub fn single(operator: Operator, value: impl Into<String>) -> Self {
        Self {
            first: Some(Bound::new(operator, value)),
            second: None,
        }
    }

    /// A range constrained by two bounds, in authoring order.
    pub fn pair(
        first_op: Operator,
        first_value: impl Into<String>,
        second_op: Operator,
        second_value: impl Into<String>,
    ) -> Self {
        Self {
            first: Some(Bound::new(first_op, first_value)),
            second: Some(Bound::new(second_op, second_value)),
        }
    }

    /// Present bounds in authoring order.
    pub fn bounds(&self) -> impl Iterator<Item = &Bound> {
        [self.first.as_ref(), self.second.as_ref()]
            .into_iter()
            .flatten()
            .filter(|b| b.is_present())
    }

    /// True when no bound is present.
    pub fn is_unbounded(&self) -> bool {
        self.bounds().next().is_none()
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.bounds().map(Bound::to_string).collect();
        if parts.is_empty() {
            write!(f, "any age")
        } else {
            write!(f, "{}", parts.join(" AND "))
        }
    }
}

/// Exact-match selector on the category column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub value: String,
}

impl CategoryRule {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Age ranges and category values to cross into strata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StratificationRequest {
    #[serde(default)]
    pub age_rules: Vec<AgeRange>,
    #[serde(default)]
    pub category_rules: Vec<CategoryRule>,
}

impl StratificationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_age(mut self, range: AgeRange) -> Self {
        self.age_rules.push(range);
        self
    }

    #[must_use]
    pub fn with_category(mut self, value: impl Into<String>) -> Self {
        self.category_rules.push(CategoryRule::new(value));
        self
    }

    /// Upper bound on the number of strata this request produces.
    pub fn planned_strata(&self) -> usize {
        match (self.age_rules.len(), self.category_rules.len()) {
            (0, categories) => categories,
            (ages, 0) => ages,
            (ages, categories) => ages * categories,
        }
    }
}
