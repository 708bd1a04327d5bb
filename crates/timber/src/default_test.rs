//! Tests for the default-sink indirection

use super::*;
use parking_lot::Mutex;
use timber_core::LogLevel;

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    fn titles(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.title.clone().unwrap_or_default())
            .collect()
    }
}

impl Sink for RecordingSink {
    fn add_entry(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
    }
}

fn entry(title: &str) -> LogEntry {
    LogEntry::new(LogLevel::Info, "test", Some(title.into()), None)
}

#[test]
fn test_entries_buffer_before_redirect() {
    let default = DefaultSink::new();

    default.add_entry(entry("early"));
    default.add_batch(vec![entry("earlier"), entry("earliest")]);

    assert!(!default.is_redirected());
    assert_eq!(default.buffered(), 3);
}

#[test]
fn test_first_redirect_replays_in_order_exactly_once() {
    let default = DefaultSink::new();
    let real = Arc::new(RecordingSink::default());

    for title in ["a", "b", "c"] {
        default.add_entry(entry(title));
    }

    default.redirect_to(real.clone());
    assert_eq!(real.titles(), vec!["a", "b", "c"]);
    assert_eq!(default.buffered(), 0);

    // New entries go straight to the target
    default.add_entry(entry("d"));
    assert_eq!(real.titles(), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_second_redirect_swaps_without_replay() {
    let default = DefaultSink::new();
    let first = Arc::new(RecordingSink::default());
    let second = Arc::new(RecordingSink::default());

    default.add_entry(entry("buffered"));
    default.redirect_to(first.clone());
    default.redirect_to(second.clone());

    // The startup buffer went to the first target only
    assert_eq!(first.titles(), vec!["buffered"]);
    assert!(second.titles().is_empty());

    default.add_entry(entry("next"));
    assert_eq!(second.titles(), vec!["next"]);
    assert_eq!(first.titles(), vec!["buffered"]);
}

#[test]
fn test_redirect_with_empty_buffer() {
    let default = DefaultSink::new();
    let real = Arc::new(RecordingSink::default());

    default.redirect_to(real.clone());
    assert!(real.titles().is_empty());
    assert!(default.is_redirected());
}

#[test]
fn test_target_tracks_redirect() {
    let default = DefaultSink::new();
    let real = Arc::new(RecordingSink::default());
    default.redirect_to(real.clone());

    default.target().add_entry(entry("via-target"));
    assert_eq!(real.titles(), vec!["via-target"]);
}
