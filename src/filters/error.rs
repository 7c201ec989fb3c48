//! Error types for filter input
//!
//! Filtering itself never fails; these errors come from parsing user input
//! (command line arguments, config values) into filter vocabulary.

use thiserror::Error;

/// Errors raised when parsing filter vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Category key not in the fixed table
    #[error("Unknown category '{0}' (see `collectr categories`)")]
    UnknownCategory(String),

    /// Patch range label not in the fixed table
    #[error("Unknown patch range '{0}' (see `collectr patches`)")]
    UnknownPatchRange(String),

    /// Sort label not recognised
    #[error("Unknown sort order '{0}', expected one of: name, patch-asc, patch-desc, id")]
    UnknownSort(String),
}
