use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Record, Table};

const UTF8_BOM: &str = "\u{feff}";

/// Why a table could not be produced from a path.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no file at '{}', check the data path", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path } | LoadError::Parse { path, .. } => path,
        }
    }

    pub(crate) fn parse(path: &Path, reason: impl ToString) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a comma-separated file with a header row into a [`Table`].
///
/// The file must be UTF-8; a leading byte-order mark is dropped so that the
/// first header name comes through clean. Header names and row order are kept
/// exactly as in the file.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::parse(path, e),
    })?;

    let text = String::from_utf8(bytes)
        .map_err(|e| LoadError::parse(path, format!("not valid UTF-8 ({e})")))?;

    parse_csv(text.strip_prefix(UTF8_BOM).unwrap_or(&text))
        .map_err(|reason| LoadError::parse(path, reason))
}

/// Parse CSV text (BOM already stripped). Errors are plain messages; the
/// caller attaches the path.
fn parse_csv(text: &str) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("reading header row: {e}"))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err("file has no header row".to_string());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        // csv reports ragged rows as UnequalLengths with the line number.
        let record = result.map_err(|e| e.to_string())?;
        rows.push(Record::from_raw(record.iter().map(str::to_string).collect()));
    }

    Ok(Table::new(headers, rows))
}
