//! Configuration module for collectr
//!
//! Manages the dataset locations and browse tunables. Configuration is
//! stored in the user's config directory as `collectr/config.toml`; a
//! default file is written the first time it is loaded.

mod setup;

pub use setup::first_time_setup;

use crate::browse::session::{DEFAULT_MIN_QUERY_LEN, DEFAULT_PROXIMITY_MARGIN};
use crate::browse::{debounce::DEFAULT_DEBOUNCE_MS, pager::DEFAULT_PAGE_SIZE, quick_jump::DEFAULT_QUICK_JUMP_LIMIT};
use crate::icon::DEFAULT_ICON_BASE_URL;
use crate::sort::DEFAULT_COLLATION_LOCALE;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_quick_jump_limit() -> usize {
    DEFAULT_QUICK_JUMP_LIMIT
}

const fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

const fn default_proximity_margin() -> usize {
    DEFAULT_PROXIMITY_MARGIN
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_collation_locale() -> String {
    DEFAULT_COLLATION_LOCALE.to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CollectrConfig {
    /// Primary dataset (`{ "Collections": [...] }`)
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Optional alternate-source document
    #[serde(default)]
    pub alt_sources_path: Option<PathBuf>,

    /// Items rendered per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delay before a search is applied
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Maximum quick-jump results
    #[serde(default = "default_quick_jump_limit")]
    pub quick_jump_limit: usize,

    /// Characters needed before a search is applied
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Rows between viewport and the last rendered item that load more
    #[serde(default = "default_proximity_margin")]
    pub proximity_margin: usize,

    /// One of `name`, `patch-asc`, `patch-desc`, `id`
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Show items that have no source by default
    #[serde(default)]
    pub show_no_source: bool,

    /// Base URL icons are resolved against
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Locale for name ordering, e.g. `zh-TW` or `en`
    #[serde(default = "default_collation_locale")]
    pub collation_locale: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for CollectrConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            alt_sources_path: None,
            page_size: default_page_size(),
            search_debounce_ms: default_debounce_ms(),
            quick_jump_limit: default_quick_jump_limit(),
            min_query_len: default_min_query_len(),
            proximity_margin: default_proximity_margin(),
            default_sort: default_sort(),
            show_no_source: false,
            icon_base_url: default_icon_base_url(),
            collation_locale: default_collation_locale(),
            quiet: false,
        }
    }
}

impl CollectrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("collectr").join("config.toml"))
    }

    /// Default location of the primary dataset
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_data_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("collectr").join("collections.json"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "writing default configuration");
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Dataset path, falling back to the default data location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn resolve_data_path(&self) -> Result<PathBuf, ConfigError> {
        self.data_path
            .clone()
            .map_or_else(Self::default_data_path, Ok)
    }

    /// Alternate-source path, defaulting to `bluemage_sources.json` beside the dataset
    #[must_use]
    pub fn resolve_alt_sources_path(&self, data_path: &Path) -> PathBuf {
        self.alt_sources_path.clone().unwrap_or_else(|| {
            data_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("bluemage_sources.json")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CollectrConfig::default();
        assert!(config.data_path.is_none());
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.quick_jump_limit, 20);
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.default_sort, "name");
        assert!(!config.show_no_source);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = CollectrConfig::load_from(&path).unwrap();
        assert_eq!(config, CollectrConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 25\nshow_no_source = true\n").unwrap();

        let config = CollectrConfig::load_from(&path).unwrap();
        assert_eq!(config.page_size, 25);
        assert!(config.show_no_source);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.icon_base_url, DEFAULT_ICON_BASE_URL);
        assert_eq!(config.collation_locale, "zh-TW");
    }

    #[test]
    fn test_collation_locale_reaches_session_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "collation_locale = \"en\"\n").unwrap();

        let config = CollectrConfig::load_from(&path).unwrap();
        let settings = crate::browse::SessionSettings::from(&config);
        assert_eq!(settings.collation_locale, "en");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = CollectrConfig {
            data_path: Some(PathBuf::from("/srv/data/collections.json")),
            default_sort: "patch-desc".to_string(),
            ..CollectrConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = CollectrConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_alt_sources_default_next_to_dataset() {
        let config = CollectrConfig::default();
        let alt = config.resolve_alt_sources_path(Path::new("/srv/data/collections.json"));
        assert_eq!(alt, PathBuf::from("/srv/data/bluemage_sources.json"));
    }
}
