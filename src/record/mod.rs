//! Log record model.
//!
//! # Responsibilities
//! - Represent a single log event as captured at the call site
//! - Define the severity scale and its wire names
//! - Carry call-site metadata (file, line, function)
//!
//! # Design Decisions
//! - Records are immutable once built: fields are private, setters consume `self`
//! - Category is shared (`Arc<str>`) so handles do not allocate per record
//! - Only the serialized form is persisted; records are consumed by the writer

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Lowercase name as written to the CSV `level` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

/// Where a record was emitted from.
///
/// Usually produced by [`here!`](crate::here), which captures the values at
/// compile time. Owned values are accepted for callers that only know their
/// location at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
    pub function: Cow<'static, str>,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file: Cow::Borrowed(file),
            line,
            function: Cow::Borrowed(function),
        }
    }

    pub fn runtime(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: Cow::Owned(file.into()),
            line,
            function: Cow::Owned(function.into()),
        }
    }

    /// Last path component of `file`, with either separator style.
    pub fn file_name(&self) -> &str {
        self.file.rsplit(['/', '\\']).next().unwrap_or_default()
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new("", 0, "")
    }
}

/// A single log event.
#[derive(Debug, Clone)]
pub struct LogRecord {
    timestamp: DateTime<FixedOffset>,
    subsystem: Option<Arc<str>>,
    category: Arc<str>,
    severity: Severity,
    source: SourceLocation,
    message: String,
    context: i32,
    attached_object: Option<String>,
}

impl LogRecord {
    /// Build a record stamped with the current local time.
    pub fn new(
        category: impl Into<Arc<str>>,
        severity: Severity,
        source: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now().fixed_offset(),
            subsystem: None,
            category: category.into(),
            severity,
            source,
            message: message.into(),
            context: 0,
            attached_object: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Subsystem label of the emitting handle. Shown on the console only.
    pub fn with_subsystem(mut self, subsystem: impl Into<Arc<str>>) -> Self {
        self.subsystem = Some(subsystem.into());
        self
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = source;
        self
    }

    pub fn with_context(mut self, context: i32) -> Self {
        self.context = context;
        self
    }

    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.attached_object = Some(object.into());
        self
    }

    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    pub fn subsystem(&self) -> Option<&str> {
        self.subsystem.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn source(&self) -> &SourceLocation {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Caller-defined context tag. Not serialized to the file.
    pub fn context(&self) -> i32 {
        self.context
    }

    pub fn attached_object(&self) -> Option<&str> {
        self.attached_object.as_deref()
    }
}
