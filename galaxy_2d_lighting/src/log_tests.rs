//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger and the global filter.

use crate::log::{self, Logger, LogEntry, LogSeverity, DefaultLogger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        // Other tests log concurrently from their own sources
        if entry.source == "galaxy2d::Test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy2d::Test".to_string(),
        message: "hull buffered".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_round_trips_through_filter_storage() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(LogSeverity::from_u8(severity as u8), severity);
    }
}

// ============================================================================
// DEFAULT LOGGER FORMAT
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[galaxy2d::Test]"));
    assert!(line.ends_with("hull buffered"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("pipeline.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(pipeline.rs:42)"));
}

#[test]
fn test_default_logger_does_not_panic() {
    DefaultLogger.log(&entry(LogSeverity::Trace, None, None));
    DefaultLogger.log(&entry(LogSeverity::Error, Some("file.rs"), Some(1)));
}

// ============================================================================
// GLOBAL LOGGER
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let entries = install_capture();
    log::set_max_severity(LogSeverity::Trace);

    crate::engine_info!("galaxy2d::Test", "prepared {} lights", 3);
    crate::engine_error!("galaxy2d::Test", "device lost");

    let captured = entries.lock().unwrap().clone();
    log::set_max_severity(LogSeverity::Debug);
    log::reset_logger();

    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].message, "prepared 3 lights");
    assert!(captured[0].file.is_none());
    assert_eq!(captured[1].severity, LogSeverity::Error);
    assert!(captured[1].file.is_some());
    assert!(captured[1].line.is_some());
}

#[test]
#[serial]
fn test_max_severity_filters_entries() {
    let entries = install_capture();
    log::set_max_severity(LogSeverity::Warn);

    crate::engine_trace!("galaxy2d::Test", "dropped");
    crate::engine_debug!("galaxy2d::Test", "dropped");
    crate::engine_info!("galaxy2d::Test", "dropped");
    crate::engine_warn!("galaxy2d::Test", "kept");

    let captured = entries.lock().unwrap().clone();
    log::set_max_severity(LogSeverity::Debug);
    log::reset_logger();

    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "kept");
}

fn bail_when_empty(count: usize) -> crate::error::Result<usize> {
    if count == 0 {
        crate::engine_bail!("galaxy2d::Test", "nothing to draw ({} items)", count);
    }
    Ok(count)
}

#[test]
#[serial]
fn test_engine_bail_logs_and_returns_backend_error() {
    let entries = install_capture();

    let result = bail_when_empty(0);
    let ok = bail_when_empty(2);

    let captured = entries.lock().unwrap().clone();
    log::reset_logger();

    assert_eq!(
        result,
        Err(crate::error::Error::BackendError("nothing to draw (0 items)".to_string()))
    );
    assert_eq!(ok, Ok(2));
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
}
