//! Catalog-specific error types
//!
//! Errors raised while reading and validating the dataset. Only a failure to
//! read or parse the primary dataset is fatal; invalid records are skipped by
//! the loader and reported through [`InvalidRecord`](CatalogError::InvalidRecord).

use std::path::PathBuf;
use thiserror::Error;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not valid JSON of the expected shape
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON error without a file behind it
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single record failed validation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    /// Whether the error concerns a single record rather than the whole dataset
    #[must_use]
    pub const fn is_record_error(&self) -> bool {
        matches!(self, Self::InvalidRecord(_))
    }
}
