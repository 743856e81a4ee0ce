//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerConfig (validated, immutable)
//!     → consumed once by Registry::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the file set is fixed for the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ConsoleConfig;
pub use schema::DiagnosticsConfig;
pub use schema::FileConfig;
pub use schema::LoggerConfig;
