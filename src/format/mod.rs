//! Record formatting.
//!
//! # Data Flow
//! ```text
//! LogRecord
//!     → csv.rs (file writer: 7 quoted fields)
//!     → console.rs (console writer: one human-readable line)
//! ```
//!
//! # Design Decisions
//! - Formatters are pure and infallible; missing data becomes empty text
//! - Each writer owns its own formatter
//! - Output carries no trailing newline; writers terminate lines

pub mod console;
pub mod csv;

pub use self::console::ConsoleFormatter;
pub use self::csv::{CsvFormatter, CSV_HEADER};

use crate::record::LogRecord;

/// `strftime` pattern for `yyyy-MM-dd HH:mm:ss.SSS ±HHMM`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// Turns a record into a single line of text.
pub trait LogFormatter: Send {
    fn format(&self, record: &LogRecord) -> String;
}
