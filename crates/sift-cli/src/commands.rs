use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use sift_cli::ingest::read_sheet;
use sift_cli::output::{default_output_name, stratum_file_name, write_csv};
use sift_cli::rules::load_request;
use sift_engine::{Progress, apply_filters_with_progress, apply_stratification_with_progress};
use tracing::info_span;

use crate::cli::{FilterArgs, RulesArgs, StratifyArgs};
use crate::summary::print_rules_table;
use crate::types::{FilterReport, StratifyReport};

pub fn run_filter(args: &FilterArgs) -> Result<FilterReport> {
    let span = info_span!("filter_command", input = %args.input.display());
    let _guard = span.enter();

    let config = args.columns.config();
    let source = args.rules.source();
    let rules = source
        .load()
        .with_context(|| format!("load rules from {source}"))?;
    let df = read_sheet(&args.input).with_context(|| format!("read {}", args.input.display()))?;

    let enabled = rules.iter().filter(|rule| rule.enabled).count();
    let bar = progress_bar(enabled, "Filtering");
    let outcome = apply_filters_with_progress(&df, &rules, &config, &mut |progress: Progress| {
        advance(&bar, progress);
    })
    .context("apply exclusion rules")?;
    bar.finish_and_clear();

    let mut report = FilterReport {
        input: args.input.clone(),
        source: source.to_string(),
        output: None,
        outcome,
    };
    if !args.dry_run {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input));
        write_csv(&mut report.outcome.data, &path)
            .with_context(|| format!("write {}", path.display()))?;
        report.output = Some(path);
    }
    Ok(report)
}

pub fn run_stratify(args: &StratifyArgs) -> Result<StratifyReport> {
    let span = info_span!("stratify_command", input = %args.input.display());
    let _guard = span.enter();

    let config = args.columns.config();
    let request = load_request(&args.strata)
        .with_context(|| format!("load strata from {}", args.strata.display()))?;
    let df = read_sheet(&args.input).with_context(|| format!("read {}", args.input.display()))?;

    let bar = progress_bar(request.planned_strata(), "Stratifying");
    let outcome =
        apply_stratification_with_progress(&df, &request, &config, &mut |progress: Progress| {
            advance(&bar, progress);
        })
        .context("stratify sheet")?;
    bar.finish_and_clear();

    let mut files = Vec::with_capacity(outcome.strata.len());
    let output_dir = if args.dry_run {
        None
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| input_dir(&args.input).join("strata"));
        for stratum in &outcome.strata {
            let path = dir.join(stratum_file_name(&stratum.name));
            let mut data = stratum.data.clone();
            write_csv(&mut data, &path).with_context(|| format!("write {}", path.display()))?;
            files.push(path);
        }
        Some(dir)
    };

    Ok(StratifyReport {
        input: args.input.clone(),
        output_dir,
        outcome,
        files,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let source = args.source();
    let rules = source
        .load()
        .with_context(|| format!("load rules from {source}"))?;
    if args.json {
        let json = serde_json::to_string_pretty(&rules).context("serialize rules")?;
        println!("{json}");
    } else {
        println!("Rules: {source}");
        print_rules_table(&rules);
    }
    Ok(())
}

fn input_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn default_output_path(input: &Path) -> PathBuf {
    input_dir(input).join(default_output_name(Local::now()))
}

/// Progress bar on stderr; hidden when stderr is not a terminal.
fn progress_bar(total: usize, prefix: &'static str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template("{prefix:>12.cyan.bold} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_prefix(prefix);
    bar
}

fn advance(bar: &ProgressBar, progress: Progress) {
    bar.set_length(progress.total as u64);
    bar.set_position(progress.completed as u64);
    bar.set_message(progress.label);
}
