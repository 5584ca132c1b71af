//! Data Sift evaluation core.
//!
//! Removes rows from a dataset with an ordered list of exclusion rules and
//! splits a dataset into named age/category strata.
//!
//! # Example
//!
//! ```ignore
//! use sift_engine::{apply_filters, apply_stratification};
//! use sift_model::{presets, GlobalConfig, StratificationRequest};
//!
//! let config = GlobalConfig::new("Idade", "Sexo");
//! let filtered = apply_filters(&df, &presets::laboratory_screening_rules(), &config)?;
//! let strata = apply_stratification(&filtered.data, &request, &config)?;
//! for stratum in strata.strata.iter() {
//!     println!("{}: {} rows", stratum.name, stratum.data.height());
//! }
//! ```
//!
//! # Failure policy
//!
//! - A rule that cannot be evaluated (missing column, non-numeric operand)
//!   excludes nothing and reports an [`EngineWarning`].
//! - A condition clause that cannot be evaluated is ignored (fails open).
//! - An age range with a non-numeric bound skips its stratum.
//! - Only a missing age or category column aborts stratification.
//! - Callers' frames are never mutated; every entry point works on a clone.

mod comparator;
mod data_utils;
mod error;
mod evaluator;
mod filter;
mod mask;
mod naming;
mod progress;
mod stratify;
mod warning;

pub use comparator::{Operand, between, compare};
pub use error::{EngineError, Result};
pub use evaluator::{Evaluation, evaluate_rule, prepare_rule};
pub use filter::{FilterOutcome, RuleStep, apply_filters, apply_filters_with_progress};
pub use mask::Mask;
pub use naming::{age_label, category_label, stratum_name};
pub use progress::{NoProgress, Progress, ProgressSink};
pub use stratify::{
    Strata, StratificationOutcome, Stratum, apply_stratification,
    apply_stratification_with_progress,
};
pub use warning::EngineWarning;
