//! Config command - show, locate or create the configuration file

use crate::cli::ConfigCommands;
use crate::config::{CollectrConfig, first_time_setup};
use crate::ui::output::{OutputWriter, StdoutWriter};
use crate::CollectrError;
use std::path::Path;

type Result<T> = std::result::Result<T, CollectrError>;

/// Execute a config subcommand against the file at `path`
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or the setup
/// wizard fails.
pub fn execute(command: ConfigCommands, config: &CollectrConfig, path: &Path, quiet: bool) -> Result<()> {
    let output = StdoutWriter::new(quiet);
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| ::config::ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            output.info(&format!("# {}", path.display()));
            output.write(rendered.trim_end());
        }
        ConfigCommands::Path => output.write(&path.display().to_string()),
        ConfigCommands::Init => {
            first_time_setup(path)?;
            output.success("Configuration initialized");
        }
    }
    Ok(())
}
