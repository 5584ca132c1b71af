//! Sequential exclusion pass.

use polars::prelude::DataFrame;
use sift_model::{ExclusionRule, GlobalConfig};
use tracing::{debug, info, info_span, warn};

use crate::error::Result;
use crate::evaluator::{evaluate_rule, prepare_rule};
use crate::progress::{NoProgress, Progress, ProgressSink};
use crate::warning::EngineWarning;

/// What one enabled rule did to the working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleStep {
    /// Index of the rule in the caller's list, disabled rules included.
    pub position: usize,
    pub label: String,
    pub rows_before: usize,
    pub rows_removed: usize,
    pub warnings: Vec<EngineWarning>,
}

impl RuleStep {
    pub fn rows_after(&self) -> usize {
        self.rows_before - self.rows_removed
    }
}

/// Result of [`apply_filters`].
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Rows that survived every rule, in input order.
    pub data: DataFrame,
    pub rows_in: usize,
    /// One entry per enabled rule, in application order.
    pub steps: Vec<RuleStep>,
}

impl FilterOutcome {
    pub fn rows_out(&self) -> usize {
        self.data.height()
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_in - self.rows_out()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &EngineWarning> {
        self.steps.iter().flat_map(|step| step.warnings.iter())
    }
}

/// Applies the enabled rules in order, each to the rows the previous ones kept.
///
/// The input frame is not modified.
pub fn apply_filters(
    df: &DataFrame,
    rules: &[ExclusionRule],
    config: &GlobalConfig,
) -> Result<FilterOutcome> {
    apply_filters_with_progress(df, rules, config, &mut NoProgress)
}

/// [`apply_filters`] with a notification after every applied rule.
pub fn apply_filters_with_progress(
    df: &DataFrame,
    rules: &[ExclusionRule],
    config: &GlobalConfig,
    progress: &mut impl ProgressSink,
) -> Result<FilterOutcome> {
    let span = info_span!("filter", rules = rules.len());
    let _guard = span.enter();

    let enabled: Vec<(usize, &ExclusionRule)> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.enabled)
        .collect();
    let total = enabled.len();
    let rows_in = df.height();
    let mut working = df.clone();
    let mut steps = Vec::with_capacity(total);

    for (done, (position, rule)) in enabled.into_iter().enumerate() {
        let label = rule.label();
        let rows_before = working.height();

        prepare_rule(&mut working, rule, config)?;
        let evaluation = evaluate_rule(&working, rule, config);
        let rows_removed = evaluation.mask.count();
        if rows_removed > 0 {
            working = working.filter(&evaluation.mask.invert().to_chunked())?;
        }

        for warning in &evaluation.warnings {
            warn!(rule = %label, "{warning}");
        }
        debug!(rule = %label, rows_before, rows_removed, "applied rule");

        steps.push(RuleStep {
            position,
            label: label.clone(),
            rows_before,
            rows_removed,
            warnings: evaluation.warnings,
        });
        progress.report(Progress {
            completed: done + 1,
            total,
            label,
        });
    }

    info!(
        rows_in,
        rows_out = working.height(),
        applied = total,
        "filter pass complete"
    );

    Ok(FilterOutcome {
        data: working,
        rows_in,
        steps,
    })
}
