use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CastlineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema mismatch in {path}: missing column `{column}`")]
    SchemaMismatch { path: PathBuf, column: String },

    #[error("parse failed in {path} at row {row}: {message}")]
    Parse {
        path: PathBuf,
        row: u64,
        message: String,
    },

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
