//! Logger registry and process-wide bootstrap.
//!
//! # Responsibilities
//! - Build the shared dispatcher from configuration
//! - Own the `"default"` category handle
//! - Hand out additional category handles over the same file set
//!
//! # Design Decisions
//! - A `Registry` is a plain value; pass it (or its loggers) where needed
//! - An optional global slot is filled once via `Registry::init`
//! - No teardown: each record hits the disk as the writer handles it;
//!   call `flush` before exit to wait for queued records

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::config::validation::validate_config;
use crate::config::{ConfigError, LoggerConfig};
use crate::dispatch::{DispatchStats, Dispatcher};
use crate::error::LogError;
use crate::logger::Logger;

/// Category of the handle every registry creates up front.
pub const DEFAULT_CATEGORY: &str = "default";

static GLOBAL: OnceLock<Registry> = OnceLock::new();

pub struct Registry {
    subsystem: String,
    dispatcher: Arc<Dispatcher>,
    default_logger: Logger,
}

impl Registry {
    /// Validate `config` and start the writer.
    pub fn new(config: LoggerConfig) -> Result<Self, LogError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let dispatcher = Arc::new(Dispatcher::new(&config)?);
        tracing::debug!(
            directory = %config.file.directory.display(),
            max_files = config.file.max_files,
            rolling_interval_secs = config.file.rolling_interval_secs,
            "Logger registry created"
        );
        Ok(Self::with_dispatcher(
            dispatcher,
            &config.subsystem,
            config.console.mirror_default,
        ))
    }

    /// Wrap an existing dispatcher (custom writers, test clocks).
    pub fn with_dispatcher(
        dispatcher: Arc<Dispatcher>,
        subsystem: &str,
        mirror_default: bool,
    ) -> Self {
        let default_logger = Logger::new(
            dispatcher.clone(),
            subsystem,
            DEFAULT_CATEGORY,
            mirror_default,
        );
        Self {
            subsystem: subsystem.to_string(),
            dispatcher,
            default_logger,
        }
    }

    /// Install the process-wide registry. Fails if one is already installed.
    pub fn init(config: LoggerConfig) -> Result<&'static Registry, LogError> {
        if GLOBAL.get().is_some() {
            return Err(LogError::AlreadyInitialized);
        }
        let registry = Registry::new(config)?;

        let mut installed = false;
        let global = GLOBAL.get_or_init(|| {
            installed = true;
            registry
        });
        if installed {
            Ok(global)
        } else {
            Err(LogError::AlreadyInitialized)
        }
    }

    /// The registry installed by [`Registry::init`], if any.
    pub fn global() -> Option<&'static Registry> {
        GLOBAL.get()
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn default_logger(&self) -> &Logger {
        &self.default_logger
    }

    /// New handle writing to the same file set.
    pub fn create_logger(&self, subsystem: &str, category: &str, mirror_to_console: bool) -> Logger {
        Logger::new(self.dispatcher.clone(), subsystem, category, mirror_to_console)
    }

    pub fn current_log_file_location(&self) -> Option<PathBuf> {
        self.dispatcher.current_log_file_location()
    }

    /// Wait until everything logged so far has been written. Blocking; see
    /// [`Dispatcher::flush`].
    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    pub fn stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }
}
