//! Where exclusion rules come from: a JSON file or a built-in preset.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sift_model::{ExclusionRule, StratificationRequest, presets};

use crate::ingest::{IngestError, Result, read_json};

/// Built-in rule sets selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Laboratory,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Laboratory => "laboratory",
        }
    }

    pub fn rules(&self) -> Vec<ExclusionRule> {
        match self {
            Preset::Laboratory => presets::laboratory_screening_rules(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "laboratory" | "lab" => Ok(Preset::Laboratory),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}

/// Rule list origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    File(PathBuf),
    Preset(Preset),
}

impl RuleSource {
    /// Loads the rules, validating every one.
    pub fn load(&self) -> Result<Vec<ExclusionRule>> {
        match self {
            RuleSource::File(path) => load_rules(path),
            RuleSource::Preset(preset) => Ok(preset.rules()),
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::File(path) => write!(f, "{}", path.display()),
            RuleSource::Preset(preset) => write!(f, "preset '{preset}'"),
        }
    }
}

/// Reads a JSON array of exclusion rules.
pub fn load_rules(path: &Path) -> Result<Vec<ExclusionRule>> {
    let rules: Vec<ExclusionRule> = read_json(path)?;
    for (position, rule) in rules.iter().enumerate() {
        rule.validate().map_err(|source| IngestError::InvalidRule {
            path: path.to_path_buf(),
            position: position + 1,
            source,
        })?;
    }
    tracing::debug!(path = %path.display(), rules = rules.len(), "loaded rules");
    Ok(rules)
}

/// Reads a stratification request from JSON.
pub fn load_request(path: &Path) -> Result<StratificationRequest> {
    read_json(path)
}
