//! Shared utilities for integration testing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use csvlog::config::FileConfig;
use csvlog::dispatch::{ConsoleWriter, Dispatcher, FileWriter};
use csvlog::rotation::{ManualClock, RotationManager};

/// Split CSV text into rows of fields using standard quoting rules
/// (quoted fields may hold commas, newlines and doubled quotes).
#[allow(dead_code)]
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Header line plus parsed records of one log file.
#[allow(dead_code)]
pub fn read_log(path: &Path) -> (String, Vec<Vec<String>>) {
    let content = fs::read_to_string(path).unwrap();
    let (header, body) = content.split_once('\n').unwrap();
    (header.to_string(), parse_csv(body))
}

#[allow(dead_code)]
pub fn file_config(dir: &Path, max_files: usize) -> FileConfig {
    FileConfig {
        directory: dir.to_path_buf(),
        file_prefix: "test".into(),
        rolling_interval_secs: 60,
        max_files,
        max_file_size_bytes: 0,
    }
}

#[allow(dead_code)]
pub fn manual_clock() -> Arc<ManualClock> {
    let start: DateTime<Utc> = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Arc::new(ManualClock::new(start))
}

/// Dispatcher over `config` driven by `clock`, console output discarded.
#[allow(dead_code)]
pub fn dispatcher_with_clock(config: &FileConfig, clock: Arc<ManualClock>) -> Arc<Dispatcher> {
    let manager = RotationManager::with_clock(config, clock);
    let dispatcher = Dispatcher::with_writers(
        FileWriter::new(manager),
        Box::new(ConsoleWriter::new(std::io::sink())),
    )
    .unwrap();
    Arc::new(dispatcher)
}

#[allow(dead_code)]
pub fn log_files(config: &FileConfig) -> Vec<PathBuf> {
    csvlog::rotation::list_log_files(&config.directory, &config.file_prefix).unwrap()
}
