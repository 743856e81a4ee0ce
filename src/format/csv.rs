//! CSV serialization of log records.
//!
//! Field order: date, category, level, `file:line`, function, message,
//! attached object. Every field is double-quoted and embedded quotes are
//! doubled; commas and newlines are left as-is inside the quotes.

use crate::format::{LogFormatter, TIMESTAMP_FORMAT};
use crate::record::LogRecord;

/// First line of every log file, written unquoted.
///
/// Names six columns while records carry seven; the trailing attached-object
/// column is unnamed.
pub const CSV_HEADER: &str = "date,category,level,file,function,message";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl LogFormatter for CsvFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let source = record.source();
        let timestamp = record.timestamp().format(TIMESTAMP_FORMAT).to_string();
        let location = format!("{}:{}", source.file_name(), source.line);

        let fields: [&str; 7] = [
            timestamp.as_str(),
            record.category(),
            record.severity().as_str(),
            location.as_str(),
            &source.function[..],
            record.message(),
            record.attached_object().unwrap_or_default(),
        ];

        let capacity = fields.iter().map(|f| f.len() + 3).sum();
        let mut line = String::with_capacity(capacity);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            push_quoted(&mut line, field);
        }
        line
    }
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for part in field.split_inclusive('"') {
        out.push_str(part);
        if part.ends_with('"') {
            out.push('"');
        }
    }
    out.push('"');
}
