//! Results handed from commands to the summary printer.

use std::path::PathBuf;

use sift_engine::{FilterOutcome, StratificationOutcome};

pub struct FilterReport {
    pub input: PathBuf,
    /// Where the rules came from, for display.
    pub source: String,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub outcome: FilterOutcome,
}

pub struct StratifyReport {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub outcome: StratificationOutcome,
    /// Written files in stratum order.
    pub files: Vec<PathBuf>,
}
