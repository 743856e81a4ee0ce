//! Record writers.
//!
//! Each writer pairs a destination with its own formatter.

use std::io::{self, Write};

use crate::format::{ConsoleFormatter, CsvFormatter, LogFormatter};
use crate::record::LogRecord;
use crate::rotation::{CurrentFile, RotationManager};

/// A destination for formatted records.
pub trait LogWriter: Send {
    fn write(&mut self, record: &LogRecord) -> io::Result<()>;
}

/// CSV lines into the rotating file set.
#[derive(Debug)]
pub struct FileWriter {
    manager: RotationManager,
    formatter: CsvFormatter,
}

impl FileWriter {
    pub fn new(manager: RotationManager) -> Self {
        Self {
            manager,
            formatter: CsvFormatter::new(),
        }
    }

    pub fn current_file(&self) -> CurrentFile {
        self.manager.current_file()
    }
}

impl LogWriter for FileWriter {
    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        let mut line = self.formatter.format(record);
        line.push('\n');
        self.manager.append(line.as_bytes())
    }
}

/// Human-readable lines to a stream, stderr by default.
pub struct ConsoleWriter<W = io::Stderr> {
    out: W,
    formatter: ConsoleFormatter,
}

impl ConsoleWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            formatter: ConsoleFormatter::new(),
        }
    }
}

impl<W: Write + Send> LogWriter for ConsoleWriter<W> {
    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        let line = self.formatter.format(record);
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}
