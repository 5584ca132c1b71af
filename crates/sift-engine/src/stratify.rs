//! Age × category stratification.

use polars::prelude::{Column, DataFrame};
use sift_common::parse_number;
use sift_model::{AgeRange, CategoryRule, GlobalConfig, Operator, StratificationRequest};
use tracing::{debug, info, info_span, warn};

use crate::comparator::{Operand, compare};
use crate::data_utils::{coerce_numeric, has_column};
use crate::error::{EngineError, Result};
use crate::mask::Mask;
use crate::naming::stratum_name;
use crate::progress::{NoProgress, Progress, ProgressSink};
use crate::warning::EngineWarning;

/// A named, non-empty subset of the dataset.
#[derive(Debug, Clone)]
pub struct Stratum {
    pub name: String,
    pub data: DataFrame,
}

/// Strata keyed by name, in the order they were first produced.
#[derive(Debug, Clone, Default)]
pub struct Strata {
    entries: Vec<Stratum>,
}

impl Strata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stratum. A stratum with the same name is replaced in place;
    /// returns true in that case.
    pub fn insert(&mut self, name: String, data: DataFrame) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|s| s.name == name) {
            existing.data = data;
            true
        } else {
            self.entries.push(Stratum { name, data });
            false
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stratum> {
        self.entries.iter()
    }

    /// Sum of rows over all strata.
    pub fn total_rows(&self) -> usize {
        self.entries.iter().map(|s| s.data.height()).sum()
    }
}

impl IntoIterator for Strata {
    type Item = Stratum;
    type IntoIter = std::vec::IntoIter<Stratum>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Strata {
    type Item = &'a Stratum;
    type IntoIter = std::slice::Iter<'a, Stratum>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of [`apply_stratification`].
#[derive(Debug, Clone)]
pub struct StratificationOutcome {
    pub strata: Strata,
    pub warnings: Vec<EngineWarning>,
    /// Number of age/category combinations considered.
    pub planned: usize,
}

/// Splits `df` into one stratum per age range × category value.
///
/// With only ages or only categories, each rule is a stratum on its own.
/// Combinations that select no rows are left out. The input frame is not
/// modified.
///
/// # Errors
///
/// Fails when the configured age or category column is missing.
pub fn apply_stratification(
    df: &DataFrame,
    request: &StratificationRequest,
    config: &GlobalConfig,
) -> Result<StratificationOutcome> {
    apply_stratification_with_progress(df, request, config, &mut NoProgress)
}

/// [`apply_stratification`] with a notification after every combination.
pub fn apply_stratification_with_progress(
    df: &DataFrame,
    request: &StratificationRequest,
    config: &GlobalConfig,
    progress: &mut impl ProgressSink,
) -> Result<StratificationOutcome> {
    let span = info_span!(
        "stratify",
        age_rules = request.age_rules.len(),
        category_rules = request.category_rules.len()
    );
    let _guard = span.enter();

    if !has_column(df, &config.age_column) {
        return Err(EngineError::MissingAgeColumn {
            column: config.age_column.clone(),
        });
    }
    if !has_column(df, &config.category_column) {
        return Err(EngineError::MissingCategoryColumn {
            column: config.category_column.clone(),
        });
    }

    let mut working = df.clone();
    coerce_numeric(&mut working, &config.age_column)?;
    let ages = working.column(&config.age_column)?;
    let categories = working.column(&config.category_column)?;

    let plan = plan(request);
    let total = plan.len();
    if total == 0 {
        info!("no age or category rules; nothing to stratify");
    }

    let mut strata = Strata::new();
    let mut warnings = Vec::new();
    for (done, (age, category)) in plan.into_iter().enumerate() {
        let name = stratum_name(age, category);
        let selected = match stratum_mask(ages, categories, age, category) {
            Ok(mask) => mask,
            Err(warning) => {
                warn!(stratum = %name, "{warning}");
                warnings.push(warning);
                progress.report(Progress {
                    completed: done + 1,
                    total,
                    label: name,
                });
                continue;
            }
        };

        let rows = selected.count();
        if rows == 0 {
            debug!(stratum = %name, "stratum is empty; skipped");
        } else {
            let data = working.filter(&selected.to_chunked())?;
            debug!(stratum = %name, rows, "built stratum");
            if strata.insert(name.clone(), data) {
                let warning = EngineWarning::DuplicateStratumName { name: name.clone() };
                warn!("{warning}");
                warnings.push(warning);
            }
        }
        progress.report(Progress {
            completed: done + 1,
            total,
            label: name,
        });
    }

    info!(
        planned = total,
        produced = strata.len(),
        rows = strata.total_rows(),
        "stratification complete"
    );

    Ok(StratificationOutcome {
        strata,
        warnings,
        planned: total,
    })
}

type Combination<'a> = (Option<&'a AgeRange>, Option<&'a CategoryRule>);

/// Category-major cross product of the request's rules.
fn plan(request: &StratificationRequest) -> Vec<Combination<'_>> {
    let ages = &request.age_rules;
    let categories = &request.category_rules;
    match (ages.is_empty(), categories.is_empty()) {
        (true, _) => categories.iter().map(|c| (None, Some(c))).collect(),
        (false, true) => ages.iter().map(|a| (Some(a), None)).collect(),
        (false, false) => categories
            .iter()
            .flat_map(|c| ages.iter().map(move |a| (Some(a), Some(c))))
            .collect(),
    }
}

fn stratum_mask(
    ages: &Column,
    categories: &Column,
    age: Option<&AgeRange>,
    category: Option<&CategoryRule>,
) -> std::result::Result<Mask, EngineWarning> {
    let mut mask = Mask::all_true(ages.len());

    if let Some(range) = age {
        for bound in range.bounds() {
            let Some(value) = parse_number(&bound.value) else {
                return Err(EngineWarning::InvalidAgeRule {
                    range: range.to_string(),
                    value: bound.value.trim().to_string(),
                });
            };
            mask = mask.and(&compare(ages, bound.operator, &Operand::Number(value)));
        }
    }

    if let Some(value) = category.map(|c| c.value.trim()).filter(|v| !v.is_empty()) {
        mask = mask.and(&compare(categories, Operator::Eq, &Operand::text(value)));
    }

    Ok(mask)
}
