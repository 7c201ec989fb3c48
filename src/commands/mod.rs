//! Command implementations
//!
//! Each command is a module with an execute function that takes the loaded
//! catalog (or what it needs to load one) plus parsed CLI args.

pub mod browse;
pub mod config;
pub mod info;
pub mod list;
pub mod search;
pub mod show;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use list::execute as list;
pub use search::execute as search;
pub use show::execute as show;

use crate::catalog::{Catalog, CatalogError, load_catalog};
use crate::config::CollectrConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Resolved dataset locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data: PathBuf,
    pub alt_sources: PathBuf,
}

impl DataPaths {
    /// Resolve paths from CLI overrides, then config, then defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no dataset path is given anywhere and the
    /// system data directory cannot be determined.
    pub fn resolve(
        config: &CollectrConfig,
        data: Option<PathBuf>,
        alt_sources: Option<PathBuf>,
    ) -> Result<Self, ::config::ConfigError> {
        let data = data.map_or_else(|| config.resolve_data_path(), Ok)?;
        let alt_sources = alt_sources.unwrap_or_else(|| config.resolve_alt_sources_path(&data));
        Ok(Self { data, alt_sources })
    }
}

/// Spinner shown on stderr while the dataset loads
///
/// Cleared when dropped, so it disappears on success and on error alike.
struct LoadingSpinner(ProgressBar);

impl LoadingSpinner {
    fn start(message: String, quiet: bool) -> Self {
        if quiet {
            return Self(ProgressBar::hidden());
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self(bar)
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

/// Load the catalog with a loading indicator
///
/// # Errors
///
/// Returns `CatalogError` if the primary dataset cannot be read or parsed.
pub fn load_with_spinner(paths: &DataPaths, quiet: bool) -> Result<Catalog, CatalogError> {
    let _spinner = LoadingSpinner::start(format!("Loading {}", paths.data.display()), quiet);
    load_catalog(&paths.data, Some(paths.alt_sources.as_path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_overrides() {
        let config = CollectrConfig {
            data_path: Some(PathBuf::from("/configured/data.json")),
            ..CollectrConfig::default()
        };

        let paths = DataPaths::resolve(&config, None, None).unwrap();
        assert_eq!(paths.data, PathBuf::from("/configured/data.json"));
        assert_eq!(paths.alt_sources, PathBuf::from("/configured/bluemage_sources.json"));

        let paths = DataPaths::resolve(
            &config,
            Some(PathBuf::from("/cli/data.json")),
            Some(PathBuf::from("/cli/alt.json")),
        )
        .unwrap();
        assert_eq!(paths.data, PathBuf::from("/cli/data.json"));
        assert_eq!(paths.alt_sources, PathBuf::from("/cli/alt.json"));
    }

    #[test]
    fn test_load_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths {
            data: temp_dir.path().join("missing.json"),
            alt_sources: temp_dir.path().join("alt.json"),
        };
        let err = load_with_spinner(&paths, true).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
