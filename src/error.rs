use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("{} is missing required columns: {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
    #[error("line {line}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("invalid control value: {0}")]
    InvalidControl(String),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TripError>;
