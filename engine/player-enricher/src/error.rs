//! Error types for the enrichment pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Errors that can occur while building player profiles
#[derive(Error, Debug)]
pub enum EnrichError {
    /// A required input table could not be found. This is the only error
    /// that aborts the run before any output is written.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// I/O errors other than a missing input file
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV-level errors (a broken header, unreadable stream)
    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// Serialization errors while writing the output JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EnrichError {
    /// Classify a file-open failure: a missing file is its own variant so
    /// the caller can print the user-facing diagnostic and return cleanly.
    pub fn from_open(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            EnrichError::MissingInput(path.to_path_buf())
        } else {
            EnrichError::Io { path: path.to_path_buf(), source }
        }
    }
}
