//! Human-readable console format.
//!
//! `2024-01-01 00:00:00.000 +0000 [app:net] ERROR client.rs:42 send() - message {object}`

use crate::format::{LogFormatter, TIMESTAMP_FORMAT};
use crate::record::{LogRecord, Severity};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Verbose => "VERBOSE",
        Severity::Debug => "DEBUG",
        Severity::Info => "INFO",
        Severity::Warning => "WARNING",
        Severity::Error => "ERROR",
    }
}

impl LogFormatter for ConsoleFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let source = record.source();
        let tag = match record.subsystem() {
            Some(subsystem) => format!("{}:{}", subsystem, record.category()),
            None => record.category().to_string(),
        };

        let mut line = format!(
            "{} [{}] {} {}:{} {} - {}",
            record.timestamp().format(TIMESTAMP_FORMAT),
            tag,
            label(record.severity()),
            source.file_name(),
            source.line,
            source.function,
            record.message(),
        );
        if let Some(object) = record.attached_object() {
            line.push_str(" {");
            line.push_str(object);
            line.push('}');
        }
        line
    }
}
