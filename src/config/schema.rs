//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the logger.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the logging facade.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Subsystem label used by the default handle (shown on the console).
    pub subsystem: String,

    /// Rotating file set settings.
    pub file: FileConfig,

    /// Development console mirroring.
    pub console: ConsoleConfig,

    /// Settings for the crate's own diagnostics.
    pub diagnostics: DiagnosticsConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            subsystem: "csvlog".to_string(),
            file: FileConfig::default(),
            console: ConsoleConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

/// Rotating file set configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory holding the log files. Created on first write.
    pub directory: PathBuf,

    /// File name prefix (e.g., "app" → `app_20240101-000000.000_000000.log`).
    pub file_prefix: String,

    /// Age after which the active file is rolled, in seconds.
    pub rolling_interval_secs: u64,

    /// Number of files kept on disk, the active one included.
    pub max_files: usize,

    /// Size in bytes at which the active file is rolled. 0 disables.
    pub max_file_size_bytes: u64,
}

impl FileConfig {
    pub fn rolling_interval(&self) -> Duration {
        Duration::from_secs(self.rolling_interval_secs)
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "app".to_string(),
            rolling_interval_secs: 24 * 60 * 60,
            max_files: 7,
            max_file_size_bytes: 0,
        }
    }
}

/// Console mirroring configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Mirror records of the default handle to stderr.
    pub mirror_default: bool,
}

/// Internal diagnostics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Log level for the crate's own tracing output (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
