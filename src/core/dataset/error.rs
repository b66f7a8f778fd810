//! Dataset Error Types
//!
//! Failures that can occur while loading the chapter dataset.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Dataset loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum DatasetError {
    #[error("Failed to read dataset at {}: {source}", path.display())]
    #[diagnostic(
        code("MEMOIR::DATASET_IO"),
        help("Check the dataset path passed on the command line or set in config.toml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    #[diagnostic(
        code("MEMOIR::DATASET_PARSE"),
        help("The dataset must be a JSON array of chapter objects")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate chapter id: {0}")]
    #[diagnostic(code("MEMOIR::DUPLICATE_ID"), help("Chapter ids must be unique"))]
    DuplicateId(u32),
}

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
