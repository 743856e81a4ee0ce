//! Per-category logger handles.
//!
//! # Responsibilities
//! - Bind a subsystem and category to severity-tagged emission calls
//! - Build records (timestamp, call site, optional object) and hand them off
//!
//! # Design Decisions
//! - Fire-and-forget: every call returns `()` and cannot fail
//! - Handles are cheap clones sharing one dispatcher
//! - Category is fixed at creation

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::dispatch::Dispatcher;
use crate::record::{LogRecord, Severity, SourceLocation};

/// A handle for one logical subsystem.
#[derive(Clone)]
pub struct Logger {
    subsystem: Arc<str>,
    category: Arc<str>,
    mirror_to_console: bool,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        subsystem: &str,
        category: &str,
        mirror_to_console: bool,
    ) -> Self {
        Self {
            subsystem: Arc::from(subsystem),
            category: Arc::from(category),
            mirror_to_console,
            dispatcher,
        }
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn mirrors_to_console(&self) -> bool {
        self.mirror_to_console
    }

    /// Start a record; finish with [`Event::emit`].
    pub fn event(&self, severity: Severity, message: impl Into<String>) -> Event<'_> {
        let record = LogRecord::new(self.category.clone(), severity, SourceLocation::default(), message)
            .with_subsystem(self.subsystem.clone());
        Event {
            logger: self,
            record,
        }
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>, location: SourceLocation) {
        self.event(severity, message).at(location).emit();
    }

    pub fn verbose(&self, message: impl Into<String>, location: SourceLocation) {
        self.log(Severity::Verbose, message, location);
    }

    pub fn debug(&self, message: impl Into<String>, location: SourceLocation) {
        self.log(Severity::Debug, message, location);
    }

    pub fn info(&self, message: impl Into<String>, location: SourceLocation) {
        self.log(Severity::Info, message, location);
    }

    pub fn warning(&self, message: impl Into<String>, location: SourceLocation) {
        self.log(Severity::Warning, message, location);
    }

    pub fn error(&self, message: impl Into<String>, location: SourceLocation) {
        self.log(Severity::Error, message, location);
    }

    /// Log an error value at error severity, including its source chain.
    pub fn error_value<E: Error + ?Sized>(&self, error: &E, location: SourceLocation) {
        self.log(Severity::Error, describe_error(error), location);
    }

    fn submit(&self, record: LogRecord) {
        self.dispatcher.submit(record, self.mirror_to_console);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("subsystem", &self.subsystem)
            .field("category", &self.category)
            .field("mirror_to_console", &self.mirror_to_console)
            .finish()
    }
}

/// `outer: inner: root`
fn describe_error<E: Error + ?Sized>(error: &E) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// A record under construction.
#[must_use = "an event does nothing until `emit` is called"]
pub struct Event<'a> {
    logger: &'a Logger,
    record: LogRecord,
}

impl Event<'_> {
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.record = self.record.with_source(location);
        self
    }

    pub fn context(mut self, context: i32) -> Self {
        self.record = self.record.with_context(context);
        self
    }

    /// Override the capture-time timestamp.
    pub fn timestamp<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
        let timestamp: DateTime<FixedOffset> = timestamp.fixed_offset();
        self.record = self.record.with_timestamp(timestamp);
        self
    }

    pub fn object(mut self, object: impl fmt::Display) -> Self {
        self.record = self.record.with_object(object.to_string());
        self
    }

    /// Attach a value as JSON. A value that fails to serialize is left empty.
    pub fn object_json<T: Serialize + ?Sized>(mut self, object: &T) -> Self {
        let json = serde_json::to_string(object).unwrap_or_default();
        self.record = self.record.with_object(json);
        self
    }

    pub fn emit(self) {
        self.logger.submit(self.record);
    }
}
