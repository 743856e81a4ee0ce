//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, at least one retained file)
//! - Reject file prefixes that would escape the log directory
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::LoggerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., `file.max_files`).
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration, collecting every problem.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let file = &config.file;

    if file.directory.as_os_str().is_empty() {
        errors.push(ValidationError::new("file.directory", "must not be empty"));
    }

    if file.file_prefix.is_empty() {
        errors.push(ValidationError::new("file.file_prefix", "must not be empty"));
    } else if file.file_prefix.contains(['/', '\\']) {
        errors.push(ValidationError::new(
            "file.file_prefix",
            "must not contain path separators",
        ));
    }

    if file.rolling_interval_secs == 0 {
        errors.push(ValidationError::new(
            "file.rolling_interval_secs",
            "must be greater than 0",
        ));
    }

    if file.max_files == 0 {
        errors.push(ValidationError::new("file.max_files", "must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
