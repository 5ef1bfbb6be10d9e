//! File logging for applications embedding the client.
//!
//! The crate itself only emits `tracing` events and spans. [`file_layer`]
//! turns them into a rotated log file as a [`Layer`] the caller adds to its
//! own subscriber. [`init`] is a shortcut that installs that layer as the
//! global subscriber.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, Layer, Registry};

/// Filter used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "jira_rest=info,warn";

const LOG_FILE_PREFIX: &str = "jira-rest";
const LOG_FILE_SUFFIX: &str = "log";

/// Errors raised while setting up file logging.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Could not determine local data directory")]
    NoLogDir,

    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Where log files go and which events reach them.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory. `None` means [`default_log_directory`].
    pub directory: Option<PathBuf>,
    /// `EnvFilter` directives. `None` reads `RUST_LOG`, then falls back to
    /// [`DEFAULT_LOG_FILTER`].
    pub filter: Option<String>,
    /// How often a new file is started.
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: None,
            rotation: Rotation::DAILY,
        }
    }
}

impl LogConfig {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    fn resolve_directory(&self) -> Result<PathBuf, LogError> {
        match &self.directory {
            Some(directory) => Ok(directory.clone()),
            None => default_log_directory().ok_or(LogError::NoLogDir),
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, LogError> {
        match &self.filter {
            Some(directives) => EnvFilter::try_new(directives).map_err(|source| LogError::Filter {
                filter: directives.clone(),
                source,
            }),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
        }
    }
}

/// `<local data dir>/jira-rest/logs`, if the platform has a local data dir.
pub fn default_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("jira-rest").join("logs"))
}

/// Build a layer that writes filtered events to a rotated file.
///
/// Files are named `jira-rest.<date>.log` inside the configured directory,
/// which is created if missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be determined or created, the
/// filter does not parse, or the log file cannot be opened.
pub fn file_layer<S>(config: &LogConfig) -> Result<impl Layer<S>, LogError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let directory = config.resolve_directory()?;
    create_log_directory(&directory)?;
    let filter = config.build_filter()?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&directory)?;

    Ok(fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter))
}

/// Install [`file_layer`] as the global subscriber.
///
/// Only for applications without a subscriber of their own; everyone else
/// should add [`file_layer`] to theirs.
///
/// # Errors
///
/// Returns [`LogError::AlreadyInitialized`] if a global subscriber is
/// already set, or any error from [`file_layer`].
///
/// # Example
///
/// ```no_run
/// use jira_rest::logging::{self, LogConfig};
///
/// logging::init(&LogConfig::default().with_filter("jira_rest=debug"))
///     .expect("Failed to initialize logging");
/// ```
pub fn init(config: &LogConfig) -> Result<(), LogError> {
    let layer = file_layer::<Registry>(config)?;
    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jira-rest logging started");
    Ok(())
}

fn create_log_directory(directory: &Path) -> Result<(), LogError> {
    std::fs::create_dir_all(directory).map_err(|source| LogError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })
}
