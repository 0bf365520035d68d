//! # Logger
//!
//! Subscriber setup for applications that embed the provisioning crates.
//! The libraries only emit `tracing` events; a host installs one subscriber here, either
//! through the fluent builder or from the `[logging]` section of its settings file.
//!
//! * Console output is compact and colored, or JSON when [`LoggerBuilder::json`] is set.
//! * File output rolls with a [`RotationPolicy`] and is written by a non-blocking worker.
//! * `RUST_LOG` is honored unless an explicit filter is supplied.
//!
//! ## Example
//!
//! ```rust
//! # use ggp_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("provisioner")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// How often the log file is rolled over.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}

/// The `[logging]` section of a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; file output is off when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// Explicit filter directives (e.g. `ggp_kernel=debug`).
    pub filter: Option<String>,
    pub rotation: RotationPolicy,
    pub max_files: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            directory: None,
            json: false,
            filter: None,
            rotation: RotationPolicy::default(),
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
struct LoggerConfig {
    level: LevelFilter,
    console: bool,
    directory: Option<PathBuf>,
    json: bool,
    filter: Option<String>,
    rotation: RotationPolicy,
    max_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            console: true,
            directory: None,
            json: false,
            filter: None,
            rotation: RotationPolicy::default(),
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    name: N,
    config: LoggerConfig,
}

impl LoggerBuilder<NoName> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Enables or disables console output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Writes rolling log files into `path`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(path.into());
        self
    }

    /// Emits JSON records on every output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.config.json = true;
        self
    }

    /// Adds explicit filter directives; `RUST_LOG` is ignored when set.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: RotationPolicy) -> Self {
        self.config.rotation = rotation;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Applies a settings-file section on top of the current configuration.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `settings.level` is not a level name.
    pub fn settings(mut self, settings: &LogSettings) -> Result<Self, LoggerError> {
        self.config.level =
            settings.level.parse().map_err(|_| LoggerError::InvalidConfiguration {
                message: format!("Unknown log level '{}'", settings.level).into(),
                context: Some("logging.level".into()),
            })?;
        self.config.console = settings.console;
        self.config.directory.clone_from(&settings.directory);
        self.config.json = settings.json;
        self.config.filter.clone_from(&settings.filter);
        self.config.rotation = settings.rotation;
        self.config.max_files = settings.max_files;
        Ok(self)
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the lifetime of the program; dropping it
    /// stops the background file writer.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already installed,
    /// [`LoggerError::InvalidConfiguration`] for invalid settings, and
    /// [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory cannot be used.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { name: WithName(name), config } = self;
        validate(&name, &config)?;

        let filter = build_filter(&config)?;
        let mut layers = Vec::new();

        if config.console {
            let console = layer().with_target(true);
            layers.push(if config.json {
                console.json().boxed()
            } else {
                console.compact().with_ansi(true).boxed()
            });
        }

        let guard = match &config.directory {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .context(format!("Failed to create {}", directory.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(config.rotation.into())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(config.max_files)
                    .build(directory)
                    .context(format!("Failed to open log files in {}", directory.display()))?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if config.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        tracing::debug!(logger = %name, "Logging initialized");

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: NoName, config: LoggerConfig::default() }
    }

    /// Returns `true` when a background file writer is attached.
    pub const fn writes_files(&self) -> bool {
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

fn validate(name: &str, config: &LoggerConfig) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if !config.console && config.directory.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No logging output enabled. Enable console or file output.".into(),
            context: None,
        });
    }

    if config.directory.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
