//! Interactive setup wizard for configuration
//!
//! Prompts for the dataset locations and page size when `collectr config
//! init` is run.

use super::CollectrConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

/// Interactive setup - prompts for dataset paths and page size
///
/// 1. Prompts for the dataset location (default: system data directory)
/// 2. Prompts for the alternate-source document (default: beside the dataset)
/// 3. Prompts for the page size
/// 4. Saves the configuration to `path`
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup(path: &Path) -> Result<CollectrConfig, ConfigError> {
    println!("Welcome to collectr! Let's point it at your dataset.\n");

    let mut config = CollectrConfig::default();
    let theme = ColorfulTheme::default();

    let data_path_str: String = Input::with_theme(&theme)
        .with_prompt("Dataset location")
        .default(CollectrConfig::default_data_path()?.to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    let data_path = PathBuf::from(data_path_str);

    let alt_path_str: String = Input::with_theme(&theme)
        .with_prompt("Alternate sources location")
        .default(config.resolve_alt_sources_path(&data_path).to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let page_size: usize = Input::with_theme(&theme)
        .with_prompt("Items per page")
        .default(config.page_size)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    config.data_path = Some(data_path);
    config.alt_sources_path = Some(PathBuf::from(alt_path_str));
    config.page_size = page_size.max(1);

    config.save_to(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}
