//! Run-wide column configuration.

use serde::{Deserialize, Serialize};

/// Column names shared by conditional gates and stratification.
///
/// Resolved once per run by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Column holding subject age.
    pub age_column: String,
    /// Column holding the categorical selector (sex/gender in clinical data).
    pub category_column: String,
}

impl GlobalConfig {
    pub fn new(age_column: impl Into<String>, category_column: impl Into<String>) -> Self {
        Self {
            age_column: age_column.into(),
            category_column: category_column.into(),
        }
    }
}
