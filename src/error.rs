//! Error types for constructing the logging pipeline.
//!
//! Emission never returns an error; only setup does.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while setting up the logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The background writer thread could not be spawned.
    #[error("Failed to start writer thread: {0}")]
    Worker(#[source] std::io::Error),

    /// `Registry::init` was called more than once.
    #[error("Global registry already initialized")]
    AlreadyInitialized,
}
