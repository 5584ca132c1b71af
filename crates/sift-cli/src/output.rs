//! CSV output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use thiserror::Error;

/// Field separator of written sheets.
pub const OUTPUT_SEPARATOR: u8 = b';';

/// File name used for a stratum whose name came out empty.
const UNNAMED_STRATUM: &str = "Stratum";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {message}")]
    Write { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Default name for a filtered sheet, e.g. `Filtered_Sheet_20240131_142501.csv`.
pub fn default_output_name(now: DateTime<Local>) -> String {
    format!("Filtered_Sheet_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// File name for a stratum, with path separators replaced.
pub fn stratum_file_name(name: &str) -> String {
    let stem = if name.is_empty() { UNNAMED_STRATUM } else { name };
    format!("{}.csv", stem.replace(['/', '\\'], "_"))
}

/// Writes `df` as `;`-separated CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .with_separator(OUTPUT_SEPARATOR)
        .finish(df)
        .map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    writer.flush().map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
