//! Collectr - a catalog browser for game collectibles
//!
//! This library loads a JSON dataset of collections (mounts, minions,
//! emotes, ...) and lets callers filter, sort, search and page through it.
//! The [`browse::BrowseSession`] owns all browse state and renders into any
//! [`browse::RenderSink`]: the terminal UI and the one-shot CLI commands
//! are both sinks.

use thiserror::Error;

pub mod browse;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod icon;
pub mod logging;
pub mod output;
pub mod sort;
pub mod text;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CollectrError {
    /// Dataset could not be loaded
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Unrecognised filter or sort input
    #[error("Filter error: {0}")]
    FilterError(#[from] filters::FilterError),
    /// Terminal UI failure
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used by commands and the binary
pub type Result<T> = std::result::Result<T, CollectrError>;
