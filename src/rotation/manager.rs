//! The rotating file set.
//!
//! # Responsibilities
//! - Pick the file each line is appended to
//! - Open a new file (header first) when the roll trigger fires
//! - Delete the oldest files beyond the retention count
//! - Publish the active file path for readers on other threads
//!
//! # Design Decisions
//! - Owned by the writer thread; no internal locking
//! - Lazy: nothing touches the disk until the first append
//! - The newest existing file is adopted on startup if it is still young enough
//! - A file that cannot be deleted leaves the retained set and is retried on
//!   every roll; it never holds back deletion of the next-oldest files

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};

use crate::config::FileConfig;
use crate::format::CSV_HEADER;
use crate::rotation::clock::{Clock, SystemClock};
use crate::rotation::naming;
use crate::rotation::trigger::{self, FileStatus, RollTrigger};

/// Shared, read-only view of the active file path.
#[derive(Debug, Clone, Default)]
pub struct CurrentFile(Arc<ArcSwapOption<PathBuf>>);

impl CurrentFile {
    pub fn get(&self) -> Option<PathBuf> {
        self.0.load_full().map(|path| path.as_ref().clone())
    }

    fn set(&self, path: &Path) {
        self.0.store(Some(Arc::new(path.to_path_buf())));
    }
}

#[derive(Debug)]
struct ActiveFile {
    path: PathBuf,
    file: File,
    opened_at: DateTime<Utc>,
    bytes_written: u64,
}

impl ActiveFile {
    fn status(&self) -> FileStatus {
        FileStatus {
            opened_at: self.opened_at,
            bytes_written: self.bytes_written,
        }
    }

    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}

#[derive(Debug)]
pub struct RotationManager {
    directory: PathBuf,
    file_prefix: String,
    max_files: usize,
    trigger: Box<dyn RollTrigger>,
    clock: Arc<dyn Clock>,
    active: Option<ActiveFile>,
    retained: VecDeque<PathBuf>,
    pending_delete: Vec<PathBuf>,
    next_sequence: u64,
    scanned: bool,
    current: CurrentFile,
}

impl RotationManager {
    pub fn new(config: &FileConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &FileConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory: config.directory.clone(),
            file_prefix: config.file_prefix.clone(),
            max_files: config.max_files.max(1),
            trigger: trigger::from_config(config),
            clock,
            active: None,
            retained: VecDeque::new(),
            pending_delete: Vec::new(),
            next_sequence: 0,
            scanned: false,
            current: CurrentFile::default(),
        }
    }

    /// Replace the trigger built from the config.
    pub fn with_trigger(mut self, trigger: Box<dyn RollTrigger>) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Handle that keeps reporting the active path after the manager moves
    /// to the writer thread.
    pub fn current_file(&self) -> CurrentFile {
        self.current.clone()
    }

    /// `None` until the first successful append.
    pub fn current_log_file_location(&self) -> Option<PathBuf> {
        self.current.get()
    }

    /// Files this manager knows about, oldest first. The last one is active.
    pub fn retained_files(&self) -> impl Iterator<Item = &Path> {
        self.retained.iter().map(PathBuf::as_path)
    }

    /// Append raw bytes (one or more complete lines) to the active file,
    /// rolling first if the trigger says so.
    pub fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        let now = self.clock.now();
        if !self.scanned {
            self.adopt_existing(now);
        }

        let needs_roll = match &self.active {
            Some(active) => self.trigger.should_roll(&active.status(), now),
            None => true,
        };
        if needs_roll {
            self.roll_at(now)?;
        }

        match self.active.as_mut() {
            Some(active) => active.append(bytes),
            None => Err(io::Error::other("no active log file")),
        }
    }

    /// Close the active file and start a new one now.
    pub fn roll(&mut self) -> io::Result<()> {
        let now = self.clock.now();
        if !self.scanned {
            self.adopt_existing(now);
        }
        self.roll_at(now)
    }

    fn adopt_existing(&mut self, now: DateTime<Utc>) {
        self.scanned = true;

        let files = match naming::scan(&self.directory, &self.file_prefix) {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(
                    directory = %self.directory.display(),
                    error = %e,
                    "Failed to scan log directory"
                );
                return;
            }
        };

        self.next_sequence = files.iter().map(|f| f.sequence + 1).max().unwrap_or(0);
        self.retained = files.iter().map(|f| f.path.clone()).collect();

        let Some(newest) = files.last() else { return };
        let status = FileStatus {
            opened_at: newest.created,
            bytes_written: fs::metadata(&newest.path).map_or(0, |m| m.len()),
        };
        if self.trigger.should_roll(&status, now) {
            return;
        }

        match OpenOptions::new().append(true).open(&newest.path) {
            Ok(file) => {
                tracing::debug!(path = %newest.path.display(), "Reusing log file");
                self.current.set(&newest.path);
                self.active = Some(ActiveFile {
                    path: newest.path.clone(),
                    file,
                    opened_at: status.opened_at,
                    bytes_written: status.bytes_written,
                });
                self.enforce_retention();
            }
            Err(e) => {
                tracing::warn!(path = %newest.path.display(), error = %e, "Failed to reopen log file");
            }
        }
    }

    fn roll_at(&mut self, now: DateTime<Utc>) -> io::Result<()> {
        fs::create_dir_all(&self.directory)?;

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let path = self
            .directory
            .join(naming::file_name(&self.file_prefix, now, sequence));

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let mut active = ActiveFile {
            path,
            file,
            opened_at: now,
            bytes_written: 0,
        };
        if let Err(e) = active.append(format!("{}\n", CSV_HEADER).as_bytes()) {
            let _ = fs::remove_file(&active.path);
            return Err(e);
        }

        if let Some(previous) = &self.active {
            tracing::debug!(
                from = %previous.path.display(),
                to = %active.path.display(),
                "Rolled log file"
            );
        }
        self.current.set(&active.path);
        self.retained.push_back(active.path.clone());
        self.active = Some(active);
        self.enforce_retention();
        Ok(())
    }

    fn enforce_retention(&mut self) {
        self.pending_delete.retain(|path| remove_log_file(path).is_err());

        while self.retained.len() > self.max_files {
            let Some(oldest) = self.retained.pop_front() else { break };
            match remove_log_file(&oldest) {
                Ok(()) => {
                    tracing::debug!(path = %oldest.display(), "Deleted old log file");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %oldest.display(),
                        error = %e,
                        "Failed to delete old log file, retrying on next roll"
                    );
                    self.pending_delete.push(oldest);
                }
            }
        }
    }
}

/// Already-missing files count as deleted.
fn remove_log_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
