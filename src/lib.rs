//! CSV logging facade with a rotating file set.
//!
//! # Architecture Overview
//!
//! ```text
//!   app threads                         writer thread
//!  ┌──────────────┐   unbounded   ┌──────────────────────────────┐
//!  │ Logger       │   channel     │ Dispatcher worker            │
//!  │  info!(...)  │──────────────▶│  ├─ FileWriter (CSV)         │──▶ <dir>/<prefix>_*.log
//!  │  error!(...) │               │  │   └─ RotationManager      │    (max_files kept)
//!  └──────────────┘               │  └─ ConsoleWriter (optional) │──▶ stderr
//!         ▲                       └──────────────────────────────┘
//!         │
//!  ┌──────────────┐
//!  │ Registry     │  config → dispatcher → "default" + named loggers
//!  └──────────────┘
//! ```
//!
//! Every file starts with the raw header `date,category,level,file,function,message`
//! followed by one seven-field quoted CSV record per log call.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logger;
mod macros;
pub mod record;
pub mod registry;
pub mod rotation;

pub use config::LoggerConfig;
pub use error::LogError;
pub use logger::{Event, Logger};
pub use record::{LogRecord, Severity, SourceLocation};
pub use registry::Registry;
