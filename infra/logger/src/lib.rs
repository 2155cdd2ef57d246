//! # Logger
//!
//! Installs the global `tracing` subscriber from the `logging` section of the application
//! configuration ([`LoggingConfig`]).
//!
//! * The console always receives events, compact and coloured, or as JSON lines when
//!   `json` is set.
//! * With `directory` set, a daily rolling file `<name>.<date>.log` is written through a
//!   non-blocking worker, keeping at most `max_files` files.
//! * The level comes from `level`; `filter` adds `EnvFilter` directives such as
//!   `vanity_engine=trace`. Without `filter`, `RUST_LOG` refines the level instead.
//!
//! ```rust,no_run
//! # use vanity_domain::config::LoggingConfig;
//! # use vanity_logger::Logger;
//! let config = LoggingConfig { level: "debug".to_owned(), ..LoggingConfig::default() };
//! let _logger = Logger::from_config("vanity", &config).unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use vanity_domain::config::LoggingConfig;

const LOG_FILE_SUFFIX: &str = "log";

/// Handle to the installed subscriber.
///
/// Holds the file writer's worker; buffered file output is flushed when it drops, so keep it
/// alive until shutdown.
#[must_use = "Dropping the logger stops the log file writer."]
#[derive(Debug)]
pub struct Logger {
    file: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global subscriber described by `config`.
    ///
    /// `name` prefixes rolled log files (e.g. `vanity-shell.2026-10-18.log`).
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for an empty name, an unknown level, invalid
    ///   filter directives or `max_files == 0` with a directory.
    /// - [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// - [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn from_config(name: &str, config: &LoggingConfig) -> Result<Self, LoggerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("Logger name cannot be empty"));
        }
        let filter = env_filter(config)?;

        let console =
            if config.json { layer().json().boxed() } else { layer().compact().with_ansi(true).boxed() };
        let mut layers = vec![console];

        let file = match &config.directory {
            Some(directory) => {
                let (writer, guard) = file_writer(name, directory, config.max_files)?;
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Self { file })
    }

    /// Whether events are also written to rolling files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.file.is_some()
    }
}

/// Parses a level name such as `"info"` or `"TRACE"`; `"off"` disables logging.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse().map_err(|_| invalid(format!("Unknown log level '{level}'")))
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(parse_level(&config.level)?.into());
    match &config.filter {
        Some(directives) => builder
            .parse(directives)
            .map_err(|e| invalid(format!("Invalid filter '{directives}': {e}"))),
        None => Ok(builder.from_env_lossy()),
    }
}

fn file_writer(
    name: &str,
    directory: &Path,
    max_files: usize,
) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
    if max_files == 0 {
        return Err(invalid("max_files must be greater than zero"));
    }
    fs::create_dir_all(directory)
        .context(format!("Failed to create log directory {}", directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(max_files)
        .build(directory)?;
    Ok(tracing_appender::non_blocking(appender))
}

fn invalid(message: impl Into<Cow<'static, str>>) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}
