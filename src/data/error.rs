use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load failures – fatal for the load, surfaced in the status line
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet: {0}")]
    Excel(#[from] calamine::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON layout: {0}")]
    JsonLayout(String),

    #[error("spreadsheet has no worksheets")]
    NoWorksheet,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// No value of the timestamp column could be parsed, so the date range
/// (and everything keyed on it) is undefined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no parseable dates in column '{column}'")]
pub struct EmptyRangeError {
    pub column: String,
}
