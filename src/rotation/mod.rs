//! File rotation subsystem.
//!
//! # Data Flow
//! ```text
//! formatted line (writer thread)
//!     → manager.rs (trigger check → maybe roll → append)
//!         → trigger.rs (interval / size / any)
//!         → naming.rs (new file name, directory scan)
//!         → clock.rs (time source)
//!     → retention: oldest files deleted beyond max_files
//! ```
//!
//! # Design Decisions
//! - One manager per file set, owned by a single thread
//! - Header line written raw as the first line of every new file
//! - Creation order comes from the sequence number in each file name

pub mod clock;
pub mod manager;
pub mod naming;
pub mod trigger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{CurrentFile, RotationManager};
pub use naming::list_log_files;
pub use trigger::{AnyTrigger, FileStatus, IntervalTrigger, RollTrigger, SizeTrigger};
