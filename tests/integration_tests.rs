//! Integration tests for channel_logger
//!
//! These tests verify:
//! - Fallback files per level and per channel
//! - Channel routing through the priority processor
//! - Debugger adapter exception handling and report rendering
//! - Assembly from configuration
//! - Concurrent appends to one file

use channel_logger::config::LoggerConfig;
use channel_logger::core::{ExceptionInfo, LogContext, LogLevel, LoggerError};
use channel_logger::debugger::{priority, DebugMessage, DebuggerLogger};
use channel_logger::extension::LoggingExtension;
use channel_logger::prelude::*;
use channel_logger::processors::{TRACY_FILENAME_KEY, TRACY_URL_KEY};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn container_in(temp_dir: &TempDir, json: &str) -> LoggingContainer {
    let mut config = LoggerConfig::from_json_str(json).expect("Failed to parse config");
    config.log_dir = Some(temp_dir.path().join("log"));
    LoggingExtension::new(config)
        .build()
        .expect("Failed to build container")
}

fn read_log(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
}

fn exception_reports(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .expect("Failed to list log dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("exception--"))
        .collect()
}

/// String value of a top-level context key in a rendered line
fn context_string<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("\"{}\":\"", key);
    let start = line.find(&marker)? + marker.len();
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

#[test]
fn test_app_channel_writes_level_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");
    let logger = container.logger();

    logger
        .info("cache warmed", LogContext::new().with_field("entries", 120))
        .unwrap();
    logger.error("payment gateway timeout", LogContext::new()).unwrap();

    let info = read_log(container.log_dir(), "info.log");
    assert!(info.contains("] cache warmed {\"entries\":120} []"));
    assert!(!info.contains("INFO"));

    let error = read_log(container.log_dir(), "error.log");
    assert_eq!(error.lines().count(), 1);
    assert!(error.trim_end().ends_with("payment gateway timeout [] []"));
}

#[test]
fn test_priority_hint_routes_to_channel_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    container
        .logger()
        .warning(
            "slow query",
            LogContext::new().with_field("priority", "Database"),
        )
        .unwrap();
    container
        .logger()
        .warning("disk almost full", LogContext::new().with_field("priority", "error"))
        .unwrap();

    let database = read_log(container.log_dir(), "database.log");
    assert!(database.contains("WARNING: slow query [] []"));

    // level-named hints are consumed and keep the app channel
    let warning = read_log(container.log_dir(), "warning.log");
    assert!(warning.contains("disk almost full [] []"));
    assert!(!container.log_dir().join("error.log").exists());
}

#[test]
fn test_channels_share_handlers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    let billing = container.channel("billing");
    let audit = container.channel("audit");
    billing.notice("invoice sent", LogContext::new()).unwrap();
    audit.info("role changed", LogContext::new().with_field("user", 7)).unwrap();

    assert!(read_log(container.log_dir(), "billing.log").contains("NOTICE: invoice sent"));
    assert!(read_log(container.log_dir(), "audit.log").contains("INFO: role changed {\"user\":7}"));
    assert_eq!(container.logger().metrics().total_logged(), 2);
}

#[test]
fn test_multiline_messages_collapse_by_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    container
        .logger()
        .notice("first line\n   second line\r\nthird", LogContext::new())
        .unwrap();

    let content = read_log(container.log_dir(), "notice.log");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("first line second line third"));
}

#[test]
fn test_expand_newlines_writes_one_entry_per_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, r#"{ "expand_newlines": true }"#);

    container
        .logger()
        .notice("first line\n\nsecond line", LogContext::new())
        .unwrap();

    let content = read_log(container.log_dir(), "notice.log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("] first line"));
    assert!(lines[1].contains("] second line"));
}

#[test]
fn test_adapter_routes_exceptions_and_renders_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    let exception = ExceptionInfo::new("PDOException", "connection refused")
        .with_location("src/db.rs", 42)
        .with_cause("socket closed");
    let hash = exception.identity_hash();

    let returned = container
        .adapter()
        .log(DebugMessage::from(exception), priority::EXCEPTION)
        .expect("Adapter log failed")
        .expect("Exception file expected");

    assert_eq!(returned.parent(), Some(container.log_dir()));
    assert!(returned.to_string_lossy().contains(&hash));

    let line = read_log(container.log_dir(), "exception.log");
    assert!(line.contains("CRITICAL: PDOException: connection refused in src/db.rs:42"));
    assert!(line.contains(TRACY_FILENAME_KEY));
    assert!(line.contains("\"tracy_created\":true"));

    let reports = exception_reports(container.log_dir());
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains(&hash));
    assert!(returned.exists());
    assert_eq!(
        returned.file_name().map(|name| name.to_string_lossy().into_owned()),
        Some(reports[0].clone())
    );
    assert_eq!(context_string(&line, TRACY_FILENAME_KEY), Some(reports[0].as_str()));
}

#[test]
fn test_repeated_exception_reuses_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");
    let exception = ExceptionInfo::new("Timeout", "upstream did not answer");

    for _ in 0..3 {
        container
            .adapter()
            .log(DebugMessage::from(exception.clone()), priority::EXCEPTION)
            .unwrap();
    }

    assert_eq!(exception_reports(container.log_dir()).len(), 1);
    let content = read_log(container.log_dir(), "exception.log");
    assert_eq!(content.lines().count(), 3);
    assert_eq!(content.matches("tracy_created").count(), 1);
}

#[test]
fn test_adapter_access_priority() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, r#"{ "access_priority": "debug" }"#);

    let file = container
        .adapter()
        .log(DebugMessage::from("GET /health 200"), priority::ACCESS)
        .unwrap();

    assert!(file.is_none());
    assert!(read_log(container.log_dir(), "access.log").contains("DEBUG: GET /health 200"));
}

#[test]
fn test_exception_url_added_with_base_url() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(
        &temp_dir,
        r#"{ "exception_base_url": "https://example.com/logs/" }"#,
    );
    let exception = ExceptionInfo::new("LogicException", "unreachable state");

    container
        .logger()
        .error(
            "state machine broke",
            LogContext::new().with_field("exception", exception),
        )
        .unwrap();

    let content = read_log(container.log_dir(), "error.log");
    assert!(content.contains(&format!(
        "\"{}\":\"https://example.com/logs/exception--",
        TRACY_URL_KEY
    )));
    let reports = exception_reports(container.log_dir());
    assert_eq!(reports.len(), 1);

    let filename = context_string(&content, TRACY_FILENAME_KEY).expect("report name");
    let url = context_string(&content, TRACY_URL_KEY).expect("report url");
    assert_eq!(filename, reports[0]);
    assert!(url.ends_with(&format!("/{}", filename)));
}

#[test]
fn test_tracy_marker_skips_rendering() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    container
        .logger()
        .error(
            "already reported",
            LogContext::new()
                .with_field("exception", ExceptionInfo::new("Error", "seen"))
                .with_field("tracy", false),
        )
        .unwrap();

    assert!(exception_reports(container.log_dir()).is_empty());
    assert!(!read_log(container.log_dir(), "error.log").contains(TRACY_FILENAME_KEY));
}

#[test]
fn test_unwritable_log_dir_fails_assembly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let occupied = temp_dir.path().join("log");
    fs::write(&occupied, "plain file").unwrap();

    let config = LoggerConfig {
        log_dir: Some(occupied.clone()),
        ..LoggerConfig::default()
    };
    match LoggingExtension::new(config).build() {
        Err(err @ LoggerError::LogDirectory { .. }) => {
            assert_eq!(
                err.to_string(),
                format!("Log dir {} cannot be created", occupied.display())
            );
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("assembly should fail"),
    }
}

#[test]
fn test_write_failure_propagates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");

    // a directory where the log file should be
    fs::create_dir(container.log_dir().join("error.log")).unwrap();

    let err = container
        .logger()
        .error("cannot land", LogContext::new())
        .unwrap_err();
    assert!(matches!(err, LoggerError::WriteFailed { .. }));
    assert!(err.to_string().contains("Is directory writable?"));
    assert_eq!(container.logger().metrics().failure_count(), 1);
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(&temp_dir, "{}");
    let logger = Arc::clone(container.logger());

    let threads = 8;
    let per_thread = 50;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let channel = logger.channel("workers");
            thread::spawn(move || {
                for i in 0..per_thread {
                    channel
                        .info(
                            format!("thread {} message {}", t, i),
                            LogContext::new().with_field("payload", "x".repeat(512)),
                        )
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let content = read_log(container.log_dir(), "workers.log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), threads * per_thread);
    assert!(lines
        .iter()
        .all(|line| line.contains("INFO: thread ") && line.ends_with("\"} []")));
}

#[test]
fn test_configured_handlers_replace_fallback() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let container = container_in(
        &temp_dir,
        r#"{ "handlers": { "0": { "type": "json", "path": "app.jsonl", "level": "warning" } } }"#,
    );

    container.logger().info("below threshold", LogContext::new()).unwrap();
    container
        .channel("orders")
        .error("order rejected", LogContext::new().with_field("id", 9))
        .unwrap();
    container.logger().flush().unwrap();

    assert_eq!(container.logger().handler_names(), vec!["json"]);
    let content = read_log(container.log_dir(), "app.jsonl");
    let entry: serde_json::Value =
        serde_json::from_str(content.lines().next().expect("one entry")).unwrap();
    assert_eq!(entry["channel"], "orders");
    assert_eq!(entry["level_name"], "ERROR");
    assert_eq!(entry["context"]["id"], 9);
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_custom_handler_service() {
    struct Collector(Arc<parking_lot::Mutex<Vec<String>>>);

    impl Handler for Collector {
        fn is_handling(&self, level: LogLevel) -> bool {
            level >= LogLevel::Notice
        }

        fn handle(&mut self, record: &LogRecord) -> channel_logger::Result<()> {
            self.0
                .lock()
                .push(format!("{}:{}", record.channel, record.message));
            Ok(())
        }

        fn flush(&mut self) -> channel_logger::Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "collector"
        }
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let mut config = LoggerConfig::from_json_str(
        r#"{ "handlers": { "mail": { "service": "collector" } } }"#,
    )
    .unwrap();
    config.log_dir = Some(temp_dir.path().to_path_buf());

    let container = LoggingExtension::new(config)
        .register_handler_service("collector", Collector(Arc::clone(&seen)))
        .build()
        .unwrap();

    assert!(!container.logger().info("quiet", LogContext::new()).unwrap());
    container
        .channel("cron")
        .alert("job stuck", LogContext::new())
        .unwrap();

    assert_eq!(*seen.lock(), vec!["cron:job stuck".to_string()]);
}
