use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        source: PolarsError,
    },
    #[error("reference table {path}: {source}")]
    Reference {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("reference table {path}: missing column `{column}`")]
    ReferenceColumn { path: PathBuf, column: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
