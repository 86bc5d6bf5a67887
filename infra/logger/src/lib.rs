//! # Logger
//!
//! Process-wide logging setup for the SnakeEyes binaries.
//!
//! Console output is on by default. A log directory turns on a rolling file
//! appender written from a background worker; keep the returned [`Logger`]
//! alive so buffered lines are flushed on shutdown. `RUST_LOG` is honored
//! unless explicit directives are set with [`LoggerBuilder::env_filter`],
//! which replace it; the level is the fallback directive in both cases.
//!
//! ## Example
//!
//! ```rust
//! use snakeeyes_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("hyper=warn")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Rolling file output settings.
#[derive(Debug, Clone)]
pub struct FileOutput {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileOutput {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Writes one JSON object per line instead of the plain format.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// A builder for configuring and installing the global tracing subscriber.
#[must_use = "The builder does nothing until .init() is called."]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level emitted when neither `RUST_LOG` nor [`Self::env_filter`] says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Filter directives (e.g., `snakeeyes=debug,hyper=info`) used instead of `RUST_LOG`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   a bad filter, or when no output is enabled.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(fmt::layer().compact().with_ansi(true).boxed());
        }

        let guard = match self.file {
            Some(output) => {
                fs::create_dir_all(&output.directory).map_err(|source| LoggerError::Io {
                    source,
                    context: Some(format!("creating {}", output.directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(output.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(output.max_files)
                    .build(&output.directory)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(if output.json { layer.json().boxed() } else { layer.boxed() });
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        tracing::debug!(logger = %self.name, "Logging initialized");
        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let invalid = |message: &'static str| LoggerError::InvalidConfiguration {
            message: message.into(),
            context: None,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("logger name cannot be empty"));
        }
        if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            return Err(invalid("max_files must be greater than zero"));
        }
        if !self.console && self.file.is_none() {
            return Err(invalid("no output enabled; enable console or file logging"));
        }
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            }
        }
    }
}

/// Handle to the installed logging system.
///
/// Holds the background writer guard when file output is enabled.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring a logger; `name` prefixes rolling log files
    /// (e.g., `snakeeyes-server.2026-10-19.log`).
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            file: None,
        }
    }

    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
