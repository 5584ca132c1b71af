//! Rule model for Data Sift.
//!
//! Exclusion rules and stratification requests arrive from authoring tools as
//! loosely shaped text. This crate gives them a typed shape that is checked
//! once, at the boundary, so the engine never re-validates per row.

pub mod config;
pub mod error;
pub mod operator;
pub mod presets;
pub mod rule;
pub mod strata;

pub use config::GlobalConfig;
pub use error::{ModelError, Result};
pub use operator::{CompoundLogic, Operator};
pub use rule::{ColumnSpec, Compound, Condition, ConditionalGate, ExclusionRule};
pub use strata::{AgeRange, Bound, CategoryRule, StratificationRequest};
