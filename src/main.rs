//! Collectr CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! collectr
//! collectr browse -c Minions
//!
//! # Print the second page of mounts added in 6.x, newest first
//! collectr list -c Mounts --patch 6.x --sort patch-desc --page 2
//!
//! # Search every collection
//! collectr search chocobo
//!
//! # Show one item as JSON
//! collectr show 71 --json
//!
//! # Quiet mode (only output results)
//! collectr -q collections
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/collectr/config.toml` on Linux) and created with defaults on
//! first run. `collectr config init` walks through it interactively.

use clap::CommandFactory;
use collectr::{
    CollectrError,
    catalog::Catalog,
    cli::{Cli, Commands},
    commands::{self, DataPaths},
    config::CollectrConfig,
    logging::{LogConfig, init_logging},
    ui::output::{OutputWriter, StdoutWriter},
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

type Result<T> = std::result::Result<T, CollectrError>;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            StdoutWriter::new(cli.quiet).error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.get_command();
    init_logging(&log_config(cli, &command))?;

    match &command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "collectr", &mut io::stdout());
        }
        Commands::Config { command } => {
            let path = config_path(cli)?;
            // `init` creates the file itself, so load only what is already there
            let config = if path.exists() {
                CollectrConfig::load_from(&path)?
            } else {
                CollectrConfig::default()
            };
            commands::config::execute(*command, &config, &path, cli.quiet)?;
        }
        Commands::Categories => commands::info::categories(Settings::load(cli)?.quiet),
        Commands::Patches => commands::info::patches(Settings::load(cli)?.quiet),
        Commands::Icon { id } => commands::info::icon(*id, &Settings::load(cli)?.config.icon_base_url),
        Commands::Browse { collection, filters } => {
            let settings = Settings::load(cli)?;
            commands::browse(
                &settings.paths()?,
                &settings.config,
                collection.as_deref(),
                filters,
                settings.quiet,
            )?;
        }
        Commands::List(args) => {
            let settings = Settings::load(cli)?;
            commands::list(&settings.catalog()?, args, &settings.config, settings.quiet)?;
        }
        Commands::Search { query, limit, format } => {
            let settings = Settings::load(cli)?;
            let catalog = settings.catalog()?;
            commands::search(&catalog, query, *limit, *format, &settings.config, settings.quiet)?;
        }
        Commands::Show { id, collection, json } => {
            let settings = Settings::load(cli)?;
            commands::show(&settings.catalog()?, *id, collection.as_deref(), *json, &settings.config)?;
        }
        Commands::Collections => {
            let settings = Settings::load(cli)?;
            commands::info::collections(&settings.catalog()?, settings.quiet);
        }
    }

    Ok(())
}

/// The terminal UI owns the screen, so it only logs to a file
fn log_config(cli: &Cli, command: &Commands) -> LogConfig {
    let log_config = LogConfig::from_verbosity(cli.verbose);
    if matches!(command, Commands::Browse { .. }) {
        log_config.for_terminal_ui(cli.log_file.clone())
    } else {
        LogConfig {
            with_ansi: io::stderr().is_terminal(),
            ..log_config.with_log_file(cli.log_file.clone())
        }
    }
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(CollectrConfig::config_path()?),
    }
}

/// Configuration and flags shared by the commands that read the dataset
struct Settings<'a> {
    cli: &'a Cli,
    config: CollectrConfig,
    quiet: bool,
}

impl<'a> Settings<'a> {
    fn load(cli: &'a Cli) -> Result<Self> {
        let path = config_path(cli)?;
        let config = CollectrConfig::load_from(&path)?;
        let quiet = cli.quiet || config.quiet;
        tracing::debug!(path = %path.display(), quiet, "configuration loaded");
        Ok(Self { cli, config, quiet })
    }

    fn paths(&self) -> Result<DataPaths> {
        Ok(DataPaths::resolve(
            &self.config,
            self.cli.data.clone(),
            self.cli.alt_sources.clone(),
        )?)
    }

    fn catalog(&self) -> Result<Catalog> {
        Ok(commands::load_with_spinner(&self.paths()?, self.quiet)?)
    }
}
