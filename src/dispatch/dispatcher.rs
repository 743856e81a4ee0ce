//! Asynchronous record dispatch.
//!
//! Producers push onto an unbounded channel and return; a single writer
//! thread drains it in FIFO order and owns every writer.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::{mpsc, oneshot};

use crate::config::LoggerConfig;
use crate::dispatch::writer::{ConsoleWriter, FileWriter, LogWriter};
use crate::error::LogError;
use crate::record::LogRecord;
use crate::rotation::{CurrentFile, RotationManager};

enum Command {
    Write {
        record: LogRecord,
        mirror_to_console: bool,
    },
    Flush(oneshot::Sender<()>),
}

#[derive(Debug, Default)]
struct Counters {
    written: AtomicU64,
    dropped: AtomicU64,
}

/// Point-in-time copy of the dispatcher counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Records appended to the file set.
    pub written: u64,
    /// Records lost to I/O errors or submitted after shutdown.
    pub dropped: u64,
}

pub struct Dispatcher {
    tx: Option<mpsc::UnboundedSender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    counters: Arc<Counters>,
    current: CurrentFile,
}

impl Dispatcher {
    /// Start a dispatcher writing to the file set described by `config`,
    /// mirroring to stderr on request.
    pub fn new(config: &LoggerConfig) -> Result<Self, LogError> {
        let file = FileWriter::new(RotationManager::new(&config.file));
        Self::with_writers(file, Box::new(ConsoleWriter::stderr()))
    }

    pub fn with_writers(file: FileWriter, console: Box<dyn LogWriter>) -> Result<Self, LogError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let current = file.current_file();

        let worker = Worker {
            rx,
            file,
            console,
            counters: counters.clone(),
        };
        let handle = thread::Builder::new()
            .name("csvlog-writer".into())
            .spawn(move || worker.run())
            .map_err(LogError::Worker)?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(handle),
            counters,
            current,
        })
    }

    /// Queue a record. Never blocks on I/O and never fails visibly.
    pub fn submit(&self, record: LogRecord, mirror_to_console: bool) {
        let command = Command::Write {
            record,
            mirror_to_console,
        };
        let sent = match &self.tx {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        };
        if !sent {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Block until every record submitted before this call has been handled.
    ///
    /// # Panics
    ///
    /// Panics when called from inside an async runtime, like every tokio
    /// `blocking_*` call. From async code run it through
    /// `tokio::task::spawn_blocking`.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = oneshot::channel();
        if tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.blocking_recv();
        }
    }

    /// Active log file, `None` before the first write.
    pub fn current_log_file_location(&self) -> Option<PathBuf> {
        self.current.get()
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            written: self.counters.written.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain what is queued and exit.
        drop(self.tx.take());
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("Log writer thread panicked");
            }
        }
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Command>,
    file: FileWriter,
    console: Box<dyn LogWriter>,
    counters: Arc<Counters>,
}

impl Worker {
    fn run(mut self) {
        tracing::debug!("Log writer started");
        while let Some(command) = self.rx.blocking_recv() {
            match command {
                Command::Write {
                    record,
                    mirror_to_console,
                } => self.write(&record, mirror_to_console),
                Command::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
        tracing::debug!("Log writer stopped");
    }

    fn write(&mut self, record: &LogRecord, mirror_to_console: bool) {
        match self.file.write(record) {
            Ok(()) => {
                self.counters.written.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    category = record.category(),
                    error = %e,
                    "Dropped log record"
                );
            }
        }

        if mirror_to_console {
            if let Err(e) = self.console.write(record) {
                tracing::debug!(error = %e, "Console mirror failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use crate::record::{Severity, SourceLocation};
    use std::io;
    use std::sync::Mutex;

    /// Console sink that records lines for inspection.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::new("test", Severity::Info, SourceLocation::default(), message)
    }

    fn dispatcher(dir: &std::path::Path, console: Captured) -> Dispatcher {
        let config = FileConfig {
            directory: dir.to_path_buf(),
            ..FileConfig::default()
        };
        let file = FileWriter::new(RotationManager::new(&config));
        Dispatcher::with_writers(file, Box::new(ConsoleWriter::new(console))).unwrap()
    }

    #[test]
    fn test_flush_makes_writes_visible() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(dir.path(), Captured::default());
        assert!(dispatcher.current_log_file_location().is_none());

        for i in 0..10 {
            dispatcher.submit(record(&format!("message {}", i)), false);
        }
        dispatcher.flush();

        let path = dispatcher.current_log_file_location().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 11);
        assert_eq!(dispatcher.stats(), DispatchStats { written: 10, dropped: 0 });
    }

    #[test]
    fn test_console_mirror_only_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let console = Captured::default();
        let dispatcher = dispatcher(dir.path(), console.clone());

        dispatcher.submit(record("quiet"), false);
        dispatcher.submit(record("loud"), true);
        dispatcher.flush();

        let out = String::from_utf8(console.0.lock().unwrap().clone()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("loud"));
        assert!(!out.contains("quiet"));
    }

    #[test]
    fn test_io_failure_counts_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "file, not directory").unwrap();

        let dispatcher = dispatcher(&blocker, Captured::default());
        dispatcher.submit(record("lost"), false);
        dispatcher.flush();

        assert_eq!(dispatcher.stats(), DispatchStats { written: 0, dropped: 1 });
        assert!(dispatcher.current_log_file_location().is_none());
    }

    #[test]
    fn test_drop_drains_queue() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(dir.path(), Captured::default());
        for i in 0..100 {
            dispatcher.submit(record(&i.to_string()), false);
        }
        let current = dispatcher.current.clone();
        drop(dispatcher);

        let content = std::fs::read_to_string(current.get().unwrap()).unwrap();
        assert_eq!(content.lines().count(), 101);
    }

    #[tokio::test]
    #[should_panic]
    async fn test_flush_inside_runtime_panics() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(dir.path(), Captured::default());
        dispatcher.submit(record("async"), false);
        dispatcher.flush();
    }

    #[tokio::test]
    async fn test_flush_from_async_through_spawn_blocking() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = Arc::new(dispatcher(dir.path(), Captured::default()));
        dispatcher.submit(record("async"), false);

        let flushed = dispatcher.clone();
        tokio::task::spawn_blocking(move || flushed.flush())
            .await
            .unwrap();
        assert_eq!(dispatcher.stats().written, 1);
    }
}
