//! Record dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Logger::emit (any thread)
//!     → dispatcher.rs (unbounded channel, returns immediately)
//!     → writer thread (FIFO, one record at a time)
//!         → writer.rs FileWriter (CSV → RotationManager)
//!         → writer.rs ConsoleWriter (only if the handle mirrors)
//! ```
//!
//! # Design Decisions
//! - Message passing: the writer thread owns every file handle
//! - No lock is held across disk I/O on the producer side
//! - I/O failures drop the record and bump a counter; nothing reaches the caller

pub mod dispatcher;
pub mod writer;

pub use dispatcher::{DispatchStats, Dispatcher};
pub use writer::{ConsoleWriter, FileWriter, LogWriter};
