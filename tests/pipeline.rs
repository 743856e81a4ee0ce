//! End-to-end tests: logger → dispatcher → rotating CSV files.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::DateTime;
use csvlog::config::ConfigError;
use csvlog::format::CSV_HEADER;
use csvlog::{info, LogError, Logger, LoggerConfig, Registry, Severity, SourceLocation};

mod common;

fn registry(dir: &std::path::Path) -> Registry {
    let mut config = LoggerConfig::default();
    config.file = common::file_config(dir, 7);
    config.file.rolling_interval_secs = 24 * 60 * 60;
    Registry::new(config).unwrap()
}

#[test]
fn test_fields_round_trip_through_csv_parser() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    let logger = registry.create_logger("com.example", "parser", false);

    let messages = [
        "plain",
        "fail: \"timeout\"",
        "\"\"",
        "comma, separated, words",
        "multi\nline\nmessage",
        "",
        "mixed \"quote\", comma\nand newline",
    ];
    for message in messages {
        logger
            .event(Severity::Warning, message)
            .object("obj \"with\" quotes")
            .at(SourceLocation::new("src/deep/path/parser.rs", 12, "parse"))
            .emit();
    }
    registry.flush();

    let path = registry.current_log_file_location().unwrap();
    let (header, rows) = common::read_log(&path);
    assert_eq!(header, CSV_HEADER);
    assert_eq!(rows.len(), messages.len());

    for (row, message) in rows.iter().zip(messages) {
        assert_eq!(row.len(), 7, "row: {:?}", row);
        assert_eq!(row[1], "parser");
        assert_eq!(row[2], "warning");
        assert_eq!(row[3], "parser.rs:12");
        assert_eq!(row[4], "parse");
        assert_eq!(row[5], message);
        assert_eq!(row[6], "obj \"with\" quotes");
    }
}

#[test]
fn test_reference_record_line() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    let logger = registry.create_logger("com.example", "net", false);

    logger
        .event(Severity::Error, "fail: \"timeout\"")
        .timestamp(DateTime::parse_from_rfc3339("2024-01-01T00:00:00.000+00:00").unwrap())
        .at(SourceLocation::new("client.rs", 42, "send()"))
        .emit();
    registry.flush();

    let content = std::fs::read_to_string(registry.current_log_file_location().unwrap()).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "date,category,level,file,function,message");
    assert_eq!(
        lines[1],
        r#""2024-01-01 00:00:00.000 +0000","net","error","client.rs:42","send()","fail: ""timeout""","""#
    );
}

#[test]
fn test_current_location_none_until_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    assert!(registry.current_log_file_location().is_none());

    registry.default_logger().debug("hello", SourceLocation::default());
    registry.flush();

    let path = registry.current_log_file_location().unwrap();
    assert!(path.exists());
    assert!(path.starts_with(dir.path()));
}

#[test]
fn test_rotation_keeps_configured_maximum() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::file_config(dir.path(), 7);
    let clock = common::manual_clock();
    let dispatcher = common::dispatcher_with_clock(&config, clock.clone());
    let logger = Logger::new(dispatcher.clone(), "com.example", "rotation", false);

    let mut created = Vec::new();
    for i in 0..10 {
        logger.info(format!("record {}", i), SourceLocation::default());
        dispatcher.flush();
        created.push(dispatcher.current_log_file_location().unwrap());
        clock.advance(Duration::from_secs(61));
    }

    let remaining = common::log_files(&config);
    assert_eq!(remaining.len(), 7);
    assert_eq!(remaining, created[3..].to_vec());
    for deleted in &created[..3] {
        assert!(!deleted.exists());
    }

    for (offset, path) in remaining.iter().enumerate() {
        let (header, rows) = common::read_log(path);
        assert_eq!(header, CSV_HEADER);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][5], format!("record {}", offset + 3));
    }
}

#[test]
fn test_writes_spanning_interval_produce_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::file_config(dir.path(), 7);
    let clock = common::manual_clock();
    let dispatcher = common::dispatcher_with_clock(&config, clock.clone());
    let logger = Logger::new(dispatcher.clone(), "com.example", "span", false);

    // The writer reads the clock, so each record is flushed before time moves.
    for _ in 0..5 {
        logger.info("tick", SourceLocation::default());
        dispatcher.flush();
        clock.advance(Duration::from_secs(20));
    }

    let files = common::log_files(&config);
    assert_eq!(files.len(), 2);
    let counts: Vec<_> = files.iter().map(|p| common::read_log(p).1.len()).collect();
    assert_eq!(counts, vec![4, 1]);
}

#[test]
fn test_concurrent_emission_loses_nothing() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(registry(dir.path()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = registry.create_logger("com.example", &format!("worker-{}", t), false);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("{}:{}", t, i), SourceLocation::default());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    registry.flush();

    let files = csvlog::rotation::list_log_files(dir.path(), "test").unwrap();
    let rows: Vec<_> = files
        .iter()
        .flat_map(|p| common::read_log(p).1)
        .collect();
    assert_eq!(rows.len(), THREADS * PER_THREAD);

    let mut next_expected: HashMap<usize, usize> = HashMap::new();
    for row in &rows {
        let (t, i) = row[5].split_once(':').unwrap();
        let t: usize = t.parse().unwrap();
        let i: usize = i.parse().unwrap();
        let expected = next_expected.entry(t).or_insert(0);
        assert_eq!(i, *expected, "thread {} out of order", t);
        *expected += 1;
        assert_eq!(row[1], format!("worker-{}", t));
    }
    assert_eq!(registry.stats().written, (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_macros_capture_call_site() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    let logger = registry.create_logger("com.example", "macros", false);

    let line = line!() + 1;
    info!(logger, "answer is {}", 42);
    csvlog::error!(logger, "failed: {:?}", "disk");
    registry.flush();

    let (_, rows) = common::read_log(&registry.current_log_file_location().unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "info");
    assert_eq!(rows[0][3], format!("pipeline.rs:{}", line));
    assert_eq!(rows[0][4], "test_macros_capture_call_site");
    assert_eq!(rows[0][5], "answer is 42");
    assert_eq!(rows[1][2], "error");
    assert_eq!(rows[1][5], "failed: \"disk\"");
}

#[test]
fn test_error_value_and_json_object() {
    #[derive(serde::Serialize)]
    struct Request<'a> {
        id: u32,
        path: &'a str,
    }

    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    let logger = registry.create_logger("com.example", "errors", false);

    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
    logger.error_value(&err, csvlog::here!());
    logger
        .event(Severity::Info, "request")
        .context(7)
        .object_json(&Request { id: 1, path: "/a" })
        .emit();
    registry.flush();

    let (_, rows) = common::read_log(&registry.current_log_file_location().unwrap());
    assert_eq!(rows[0][2], "error");
    assert_eq!(rows[0][5], "no access");
    assert_eq!(rows[1][6], r#"{"id":1,"path":"/a"}"#);
}

#[test]
fn test_unwritable_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let registry = registry(&blocker);
    registry.default_logger().error("nowhere to go", SourceLocation::default());
    registry.flush();

    assert!(registry.current_log_file_location().is_none());
    assert_eq!(registry.stats().dropped, 1);
    assert_eq!(registry.stats().written, 0);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = LoggerConfig::default();
    config.file = common::file_config(dir.path(), 0);
    config.file.rolling_interval_secs = 0;
    config.file.file_prefix = "../escape".into();

    match Registry::new(config.clone()) {
        Err(LogError::Config(ConfigError::Validation(errors))) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
            assert_eq!(
                fields,
                vec!["file.file_prefix", "file.rolling_interval_secs", "file.max_files"]
            );
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("invalid config accepted"),
    }
    assert!(matches!(Registry::init(config), Err(LogError::Config(_))));
    assert!(Registry::global().is_none());

    let err = csvlog::config::parse_config("[file]\nmax_files = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
}
