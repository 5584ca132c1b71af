//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sift_cli::rules::{Preset, RuleSource};
use sift_model::GlobalConfig;

#[derive(Parser)]
#[command(
    name = "sift",
    version,
    about = "Data Sift - exclusion filtering and stratification of lab sheets",
    long_about = "Remove rows from a CSV sheet with an ordered list of exclusion rules,\n\
                  or split it into age and category strata.\n\n\
                  Decimal commas (7,0) are understood; output sheets use ';'."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply exclusion rules to a sheet and write the rows that remain.
    Filter(FilterArgs),

    /// Split a sheet into age/category strata, one CSV per stratum.
    Stratify(StratifyArgs),

    /// Show a rule list.
    Rules(RulesArgs),
}

/// Column names shared by every command that reads a sheet.
#[derive(Args)]
pub struct ColumnArgs {
    /// Column holding the subject's age.
    #[arg(long = "age-column", value_name = "COLUMN", default_value = "Idade")]
    pub age_column: String,

    /// Column holding the category used for strata and rule conditions.
    #[arg(long = "category-column", value_name = "COLUMN", default_value = "Sexo")]
    pub category_column: String,
}

impl ColumnArgs {
    pub fn config(&self) -> GlobalConfig {
        GlobalConfig::new(self.age_column.trim(), self.category_column.trim())
    }
}

/// Either a rule file or a named preset.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct RuleSourceArgs {
    /// JSON file with an array of exclusion rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Built-in rule set.
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<Preset>,
}

impl RuleSourceArgs {
    pub fn source(&self) -> RuleSource {
        match (&self.rules, self.preset) {
            (Some(path), _) => RuleSource::File(path.clone()),
            (None, Some(preset)) => RuleSource::Preset(preset),
            (None, None) => RuleSource::Preset(Preset::Laboratory),
        }
    }
}

#[derive(Args)]
pub struct FilterArgs {
    /// Sheet to filter (CSV, ',' or ';' separated).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub rules: RuleSourceArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Output file (default: Filtered_Sheet_<timestamp>.csv next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report what each rule would remove without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct StratifyArgs {
    /// Sheet to split (CSV, ',' or ';' separated).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON file with the age ranges and category values to cross.
    #[arg(long = "strata", value_name = "FILE")]
    pub strata: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Directory for the stratum CSVs (default: <INPUT dir>/strata).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report strata sizes without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct RulesArgs {
    /// JSON file with an array of exclusion rules.
    #[arg(long = "rules", value_name = "FILE", conflicts_with = "preset")]
    pub rules: Option<PathBuf>,

    /// Built-in rule set (default: laboratory).
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<Preset>,

    /// Print the rules as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

impl RulesArgs {
    pub fn source(&self) -> RuleSource {
        match (&self.rules, self.preset) {
            (Some(path), _) => RuleSource::File(path.clone()),
            (None, preset) => RuleSource::Preset(preset.unwrap_or(Preset::Laboratory)),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
