//! Null sink - discards all entries
//!
//! Useful as a terminal sink in tests and as a safe fallback target.

use timber_core::{LogEntry, Sink};

/// Sink that drops every entry it receives
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NullSink {
    /// Create a null sink
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NullSink {
    fn add_entry(&self, _entry: LogEntry) {}

    fn add_batch(&self, _entries: Vec<LogEntry>) {}
}
