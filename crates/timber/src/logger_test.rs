//! Tests for hierarchical loggers

use super::*;
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    fn levels(&self) -> Vec<LogLevel> {
        self.entries.lock().iter().map(|e| e.level).collect()
    }

    fn loggers(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.logger.clone()).collect()
    }

    fn count(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Sink for RecordingSink {
    fn add_entry(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
    }
}

// ============================================================================
// Naming tests
// ============================================================================

#[test]
fn test_child_names_concatenate() {
    let sink = Arc::new(RecordingSink::default());
    let root = Logger::root("server", LogLevel::Spam, sink.clone());
    let http = root.child("http");
    let router = http.child("router");

    assert_eq!(root.full_name(), "server");
    assert_eq!(http.full_name(), "server.http");
    assert_eq!(router.full_name(), "server.http.router");

    router.info("hit");
    assert_eq!(sink.loggers(), vec!["server.http.router"]);
}

// ============================================================================
// Level gating tests
// ============================================================================

#[test]
fn test_level_filters_verbose_entries() {
    let sink = Arc::new(RecordingSink::default());
    let log = Logger::root("app", LogLevel::Warn, sink.clone());

    log.spam("dropped");
    log.info("dropped");
    log.warn("kept");
    log.error("kept");

    assert_eq!(sink.levels(), vec![LogLevel::Warn, LogLevel::Error]);
}

#[test]
fn test_enabled_matches_emission() {
    let sink = Arc::new(RecordingSink::default());
    let log = Logger::root("app", LogLevel::Info, sink);

    assert!(log.enabled(LogLevel::Error));
    assert!(log.enabled(LogLevel::Warn));
    assert!(log.enabled(LogLevel::Info));
    assert!(!log.enabled(LogLevel::Spam));
}

#[test]
fn test_child_inherits_level() {
    let sink = Arc::new(RecordingSink::default());
    let root = Logger::root("app", LogLevel::Warn, sink);
    assert_eq!(root.level(), LogLevel::Warn);
    assert_eq!(root.child("sub").level(), LogLevel::Warn);
}

#[test]
fn test_child_with_level_overrides() {
    let sink = Arc::new(RecordingSink::default());
    let root = Logger::root("app", LogLevel::Error, sink.clone());
    let verbose = root.child_with_level("debugged", LogLevel::Spam);

    root.info("dropped");
    verbose.spam("kept");

    assert_eq!(sink.count(), 1);
    assert_eq!(sink.loggers(), vec!["app.debugged"]);
}

// ============================================================================
// Sink inheritance tests
// ============================================================================

#[test]
fn test_child_copies_sink_at_construction() {
    let first = Arc::new(RecordingSink::default());
    let second = Arc::new(RecordingSink::default());

    let root = Logger::root("app", LogLevel::Info, first.clone());
    let early_child = root.child("early");

    root.set_sink(second.clone());
    let late_child = root.child("late");

    early_child.info("to-first");
    late_child.info("to-second");

    assert_eq!(first.loggers(), vec!["app.early"]);
    assert_eq!(second.loggers(), vec!["app.late"]);
}

#[test]
fn test_set_sink_does_not_propagate_to_children() {
    let first = Arc::new(RecordingSink::default());
    let second = Arc::new(RecordingSink::default());

    let root = Logger::root("app", LogLevel::Info, first.clone());
    let child = root.child("worker");

    root.set_sink(second.clone());

    child.info("still-first");
    root.info("now-second");

    assert_eq!(first.loggers(), vec!["app.worker"]);
    assert_eq!(second.loggers(), vec!["app"]);
}

// ============================================================================
// Payload tests
// ============================================================================

#[test]
fn test_entry_carries_title_and_payload() {
    let sink = Arc::new(RecordingSink::default());
    let log = Logger::root("app", LogLevel::Info, sink.clone());

    log.error_with("boom", serde_json::json!({"code": 7}));

    let entries = sink.entries.lock();
    assert_eq!(entries[0].title.as_deref(), Some("boom"));
    assert_eq!(entries[0].data.as_ref().unwrap()["code"], 7);
}

#[test]
fn test_filtered_entry_is_never_constructed() {
    let sink = Arc::new(RecordingSink::default());
    let log = Logger::root("app", LogLevel::Error, sink.clone());

    log.log(LogLevel::Spam, Some("dropped"), None);
    assert_eq!(sink.count(), 0);
}
