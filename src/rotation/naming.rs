//! Log file naming and discovery.
//!
//! Files are named `<prefix>_<yyyyMMdd-HHmmss.SSS>_<seq>.log` (UTC). The
//! sequence number alone gives creation order; the stamp is informational and
//! goes backwards whenever the wall clock does.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S%.3f";
const EXTENSION: &str = ".log";

/// A log file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub created: DateTime<Utc>,
    pub sequence: u64,
}

pub fn file_name(prefix: &str, created: DateTime<Utc>, sequence: u64) -> String {
    format!(
        "{}_{}_{:06}{}",
        prefix,
        created.format(STAMP_FORMAT),
        sequence,
        EXTENSION
    )
}

/// Recover creation time and sequence from a file name produced by [`file_name`].
pub fn parse_file_name(prefix: &str, name: &str) -> Option<(DateTime<Utc>, u64)> {
    let rest = name
        .strip_prefix(prefix)?
        .strip_prefix('_')?
        .strip_suffix(EXTENSION)?;
    let (stamp, sequence) = rest.rsplit_once('_')?;
    let sequence = sequence.parse().ok()?;
    let created = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?.and_utc();
    Some((created, sequence))
}

/// Log files in `dir` belonging to `prefix`, oldest first.
pub fn scan(dir: &Path, prefix: &str) -> io::Result<Vec<LogFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some((created, sequence)) = parse_file_name(prefix, name) {
            files.push(LogFile {
                path: entry.path(),
                created,
                sequence,
            });
        }
    }
    files.sort_by_key(|f| (f.sequence, f.created));
    Ok(files)
}

/// Paths of the retained file set, oldest first.
pub fn list_log_files(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    Ok(scan(dir, prefix)?.into_iter().map(|f| f.path).collect())
}
