//! Spreadsheet and rule-file reading.
//!
//! Sheets are read with every column as text so that locale decimals such
//! as `7,0` reach the engine untouched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use sift_model::ModelError;
use thiserror::Error;

/// Errors raised while reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    #[error("unsupported encoding {encoding} in {path}; save the sheet as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("rule {position} in {path} is invalid: {source}")]
    InvalidRule {
        path: PathBuf,
        position: usize,
        #[source]
        source: ModelError,
    },
}

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

const UTF8_BOM: &str = "\u{feff}";

/// Picks the field separator from a header line: `;` when it appears more
/// often than `,`, otherwise `,`.
pub fn sniff_delimiter(header: &str) -> u8 {
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Reads a delimited sheet with all columns as text.
pub fn read_sheet(path: &Path) -> Result<DataFrame> {
    let header = read_header_line(path)?;
    let separator = sniff_delimiter(&header);
    tracing::debug!(
        path = %path.display(),
        separator = %char::from(separator),
        "detected separator"
    );

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded sheet"
    );
    Ok(df)
}

/// Reads a JSON file into any model type.
pub fn read_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// First line of the file with any UTF-8 BOM removed.
fn read_header_line(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(open(path)?);
    let mut raw = Vec::new();
    reader
        .read_until(b'\n', &mut raw)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if raw.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if raw.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let line = String::from_utf8_lossy(&raw);
    let line = line.strip_prefix(UTF8_BOM).unwrap_or(&line).trim_end();
    if line.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("ID;Idade;Sexo"), b';');
        assert_eq!(sniff_delimiter("ID,Idade,Sexo"), b',');
        assert_eq!(sniff_delimiter("Nome, completo;Idade;Sexo"), b';');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_read_sheet_semicolon_keeps_text() {
        let file = create_temp_csv("ID;Hemo.#HGB;Idade\n1;7,0;80\n2;12,5;40\n");
        let df = read_sheet(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let hgb = df.column("Hemo.#HGB").unwrap();
        assert_eq!(hgb.dtype(), &DataType::String);
        assert_eq!(hgb.str().unwrap().get(0), Some("7,0"));
        assert_eq!(df.column("Idade").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_read_sheet_with_bom() {
        let file = create_temp_csv("\u{feff}ID,Idade\n1,80\n");
        let df = read_sheet(file.path()).unwrap();
        assert!(df.column("ID").is_ok());
    }

    #[test]
    fn test_read_sheet_empty_file() {
        let file = create_temp_csv("");
        assert!(matches!(
            read_sheet(file.path()),
            Err(IngestError::EmptyCsv { .. })
        ));
    }

    #[test]
    fn test_read_sheet_missing_file() {
        assert!(matches!(
            read_sheet(Path::new("/nonexistent/sheet.csv")),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
