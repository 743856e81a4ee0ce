//! Roll triggers.
//!
//! # Responsibilities
//! - Decide, before each append, whether the active file must be replaced
//!
//! # Design Decisions
//! - Time-based by default (age of the active file)
//! - Size-based trigger available, off unless configured
//! - Triggers compose with `AnyTrigger`

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::FileConfig;

/// What a trigger knows about the active file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus {
    pub opened_at: DateTime<Utc>,
    pub bytes_written: u64,
}

impl FileStatus {
    /// Age at `now`. Zero if the clock moved backwards.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.opened_at).to_std().unwrap_or_default()
    }
}

pub trait RollTrigger: Send + fmt::Debug {
    fn should_roll(&self, file: &FileStatus, now: DateTime<Utc>) -> bool;
}

/// Roll once the file is older than `interval`.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTrigger {
    interval: Duration,
}

impl IntervalTrigger {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for IntervalTrigger {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}

impl RollTrigger for IntervalTrigger {
    fn should_roll(&self, file: &FileStatus, now: DateTime<Utc>) -> bool {
        file.age(now) > self.interval
    }
}

/// Roll once the file holds at least `max_bytes`.
#[derive(Debug, Clone, Copy)]
pub struct SizeTrigger {
    max_bytes: u64,
}

impl SizeTrigger {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl RollTrigger for SizeTrigger {
    fn should_roll(&self, file: &FileStatus, _now: DateTime<Utc>) -> bool {
        file.bytes_written >= self.max_bytes
    }
}

/// Roll when any inner trigger fires.
#[derive(Debug, Default)]
pub struct AnyTrigger {
    triggers: Vec<Box<dyn RollTrigger>>,
}

impl AnyTrigger {
    pub fn new(triggers: Vec<Box<dyn RollTrigger>>) -> Self {
        Self { triggers }
    }
}

impl RollTrigger for AnyTrigger {
    fn should_roll(&self, file: &FileStatus, now: DateTime<Utc>) -> bool {
        self.triggers.iter().any(|t| t.should_roll(file, now))
    }
}

/// Build the trigger described by a file config.
pub fn from_config(config: &FileConfig) -> Box<dyn RollTrigger> {
    let interval = IntervalTrigger::new(config.rolling_interval());
    if config.max_file_size_bytes == 0 {
        return Box::new(interval);
    }
    Box::new(AnyTrigger::new(vec![
        Box::new(interval),
        Box::new(SizeTrigger::new(config.max_file_size_bytes)),
    ]))
}
