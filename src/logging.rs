//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! # Log Levels
//!
//! - `warn`: skipped records, ignored alternate-source failures (default)
//! - `info`: dataset load summary (`-v`)
//! - `debug`: filter, sort and collection changes (`-vv`)
//! - `trace`: every rendered page (`-vvv`)
//!
//! The terminal UI owns the screen, so while it runs logs go to a file or
//! nowhere.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stderr,
    /// Appended to a file
    File(PathBuf),
    /// No subscriber is installed
    Disabled,
}

/// Configuration for logging behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub target: LogTarget,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            target: LogTarget::default(),
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the `-v` count
    ///
    /// - 0: warn
    /// - 1: info
    /// - 2: debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    /// Route logs for a session that owns the terminal
    ///
    /// Logs go to `log_file` when given, otherwise they are disabled.
    #[must_use]
    pub fn for_terminal_ui(mut self, log_file: Option<PathBuf>) -> Self {
        self.target = log_file.map_or(LogTarget::Disabled, LogTarget::File);
        self
    }

    /// Route logs to `log_file` when given, stderr otherwise
    #[must_use]
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.target = log_file.map_or(LogTarget::Stderr, LogTarget::File);
        self
    }
}

/// Initialize the global tracing subscriber
///
/// Call once at startup. `RUST_LOG` overrides the configured level.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let filter = build_env_filter(config.level);

    match &config.target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(false)
                .without_time();
            let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
        }
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,collectr={level_str}")))
}
