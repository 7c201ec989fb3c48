//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// IO error while drawing or reading terminal events
    #[error("Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    /// The terminal is not interactive
    #[error("collectr browse needs an interactive terminal")]
    NotATerminal,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
