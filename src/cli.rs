//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for collectr using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive terminal browser (default)
//! - **list**: One page of a filtered, sorted collection
//! - **search**: Quick-jump search across every collection
//! - **show**: Detail view of one item
//! - **collections** / **categories** / **patches**: vocabularies
//! - **icon**: Icon URL for an icon id
//! - **config**: Show, locate or create the configuration file
//! - **completions**: Shell completion scripts
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use collectr::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["collectr", "list", "-c", "Mounts", "--page", "2"]);
//! match cli.get_command() {
//!     Commands::List(args) => assert_eq!(args.page, 2),
//!     _ => unreachable!(),
//! }
//! ```

use crate::catalog::SourceCategory;
use crate::filters::{FilterState, PatchRange};
use crate::output::OutputFormat;
use crate::sort::SortOrder;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "collectr")]
#[command(about = "Browse, filter and search a catalog of game collectibles", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Dataset file (overrides config)
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Alternate-source document (overrides config)
    #[arg(long = "alt-sources", value_name = "PATH", global = true)]
    pub alt_sources: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Filter flags shared by `browse` and `list`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only items with a source in this category (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<SourceCategory>,

    /// Only items added in this patch range: 7.x .. 2.x or unknown (repeatable)
    #[arg(long = "patch", value_name = "RANGE")]
    pub patches: Vec<PatchRange>,

    /// Only items whose name contains this text
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Include items that have no source at all
    #[arg(long = "show-no-source")]
    pub show_no_source: bool,

    /// Sort order
    #[arg(long = "sort", value_enum, value_name = "ORDER")]
    pub sort: Option<SortOrder>,
}

impl FilterArgs {
    /// Build the filter state these flags describe
    ///
    /// `show_no_source` is on when either the flag or `default_show` is set.
    #[must_use]
    pub fn to_filter_state(&self, default_show: bool) -> FilterState {
        let mut state = FilterState::new(self.show_no_source || default_show);
        state.categories.extend(self.categories.iter().copied());
        state.patches.extend(self.patches.iter().copied());
        if let Some(query) = &self.search {
            state.set_search_query(query);
        }
        state
    }
}

/// Arguments of the `list` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Collection to list (default: first collection)
    #[arg(short = 'c', long = "collection", value_name = "NAME")]
    pub collection: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page number, starting at 1
    #[arg(long = "page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Items per page (overrides config)
    #[arg(long = "page-size", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive browser (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Collection to open first
        #[arg(short = 'c', long = "collection", value_name = "NAME")]
        collection: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print one page of a collection
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Search item names across every collection
    #[command(visible_alias = "s")]
    Search {
        /// Text to look for (at least two characters)
        query: String,

        /// Maximum number of results (overrides config)
        #[arg(long = "limit", value_name = "N")]
        limit: Option<usize>,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the detail view of an item
    Show {
        /// Item id
        id: u32,

        /// Collection to look in (default: first collection containing the id)
        #[arg(short = 'c', long = "collection", value_name = "NAME")]
        collection: Option<String>,

        /// Print the detail as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// List collections with their item counts
    Collections,

    /// List the source categories accepted by --category
    Categories,

    /// List the patch ranges accepted by --patch
    Patches,

    /// Print the URL of an icon id
    Icon {
        /// Numeric icon id
        id: u32,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Interactively create the configuration file
    Init,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            collection: None,
            filters: FilterArgs::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["collectr"]);
        assert!(matches!(cli.get_command(), Commands::Browse { collection: None, .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["collectr", "collections", "-q", "-vv", "--data", "/tmp/data.json"]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/data.json")));
    }

    #[test]
    fn test_list_filters_parse_vocabularies() {
        let cli = Cli::parse_from([
            "collectr", "list", "--category", "gil", "--category", "huntseals", "--patch", "2.x", "--sort", "patch-desc",
            "-s", "cho",
        ]);
        let Commands::List(args) = cli.get_command() else {
            panic!("expected list");
        };
        assert_eq!(args.filters.categories, vec![SourceCategory::Gil, SourceCategory::HuntSeals]);
        assert_eq!(args.filters.patches, vec![PatchRange::V2]);
        assert_eq!(args.filters.sort, Some(SortOrder::PatchDesc));
        assert_eq!(args.page, 1);

        let state = args.filters.to_filter_state(false);
        assert_eq!(state.query(), "cho");
        assert!(!state.show_no_source);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["collectr", "list", "--category", "nope"]).is_err());
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["collectr", "list", "--page", "0"]).is_err());
    }
}
