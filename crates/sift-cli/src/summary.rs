use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sift_engine::EngineWarning;
use sift_model::{ConditionalGate, ExclusionRule};

use crate::types::{FilterReport, StratifyReport};

pub fn print_filter_summary(report: &FilterReport) {
    let outcome = &report.outcome;
    println!("Input: {}", report.input.display());
    println!("Rules: {}", report.source);
    match &report.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Rows before"),
        header_cell("Removed"),
        header_cell("Rows after"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for idx in 2..=5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for step in &outcome.steps {
        table.add_row(vec![
            Cell::new(step.position + 1),
            Cell::new(&step.label),
            Cell::new(step.rows_before),
            count_cell(step.rows_removed, Color::Red),
            Cell::new(step.rows_after()),
            count_cell(step.warnings.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.rows_in).add_attribute(Attribute::Bold),
        count_cell(outcome.rows_removed(), Color::Red).add_attribute(Attribute::Bold),
        Cell::new(outcome.rows_out()).add_attribute(Attribute::Bold),
        count_cell(outcome.warnings().count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_warnings(outcome.warnings());
}

pub fn print_stratify_summary(report: &StratifyReport) {
    let outcome = &report.outcome;
    println!("Input: {}", report.input.display());
    match &report.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    if outcome.strata.is_empty() {
        println!(
            "No strata produced ({} combination(s) considered).",
            outcome.planned
        );
        print_warnings(outcome.warnings.iter());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stratum"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (idx, stratum) in outcome.strata.iter().enumerate() {
        let file = report
            .files
            .get(idx)
            .and_then(|path| path.file_name())
            .map_or_else(|| dim_cell("-"), |name| Cell::new(name.to_string_lossy()));
        table.add_row(vec![
            Cell::new(&stratum.name).add_attribute(Attribute::Bold),
            Cell::new(stratum.data.height()),
            file,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.strata.total_rows()).add_attribute(Attribute::Bold),
        dim_cell(format!(
            "{} of {} combination(s) non-empty",
            outcome.strata.len(),
            outcome.planned
        )),
    ]);
    println!("{table}");
    print_warnings(outcome.warnings.iter());
}

pub fn print_rules_table(rules: &[ExclusionRule]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("On"),
        header_cell("Columns"),
        header_cell("Condition"),
        header_cell("Logic"),
        header_cell("Second condition"),
        header_cell("Only when"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);

    for (idx, rule) in rules.iter().enumerate() {
        let (logic, secondary) = match &rule.compound {
            Some(compound) => (
                Cell::new(compound.logic),
                Cell::new(compound.secondary.to_string()),
            ),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            enabled_cell(rule.enabled),
            Cell::new(rule.columns.to_string()),
            Cell::new(rule.primary.to_string()),
            logic,
            secondary,
            rule.gate
                .as_ref()
                .and_then(gate_text)
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

/// Human text for a rule condition, `None` when it restricts nothing.
fn gate_text(gate: &ConditionalGate) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(range) = gate.age.as_ref().filter(|range| !range.is_unbounded()) {
        parts.push(format!("age {range}"));
    }
    if let Some(category) = gate.category_value() {
        parts.push(format!("category = {category}"));
    }
    (!parts.is_empty()).then(|| parts.join("; "))
}

fn print_warnings<'a>(warnings: impl Iterator<Item = &'a EngineWarning>) {
    let warnings: Vec<&EngineWarning> = warnings.collect();
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn enabled_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}
