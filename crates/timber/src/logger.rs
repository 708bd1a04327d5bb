//! Hierarchical named loggers
//!
//! Loggers form a tree by construction only: a child concatenates its
//! parent's fully-qualified name and copies the parent's current sink
//! and level. There is no runtime back-traversal - reassigning a
//! logger's sink later is local to that logger and never propagates to
//! children that already exist.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use timber_core::{LogEntry, LogLevel, Sink};

/// A named emitter of log entries
///
/// The effective sink is never null: root loggers are handed a target at
/// construction (typically the runtime's buffering default).
pub struct Logger {
    full_name: String,
    level: LogLevel,
    sink: ArcSwap<Arc<dyn Sink>>,
}

impl Logger {
    /// Create a root logger
    pub fn root(name: impl Into<String>, level: LogLevel, sink: Arc<dyn Sink>) -> Arc<Self> {
        Arc::new(Self {
            full_name: name.into(),
            level,
            sink: ArcSwap::new(Arc::new(sink)),
        })
    }

    /// Create a child logger named `{parent}.{name}`
    ///
    /// The child copies this logger's *current* sink and level; later
    /// reassignments on either side do not affect the other.
    pub fn child(&self, name: &str) -> Arc<Self> {
        self.child_with_level(name, self.level)
    }

    /// Create a child logger with its own verbosity level
    pub fn child_with_level(&self, name: &str, level: LogLevel) -> Arc<Self> {
        Arc::new(Self {
            full_name: format!("{}.{}", self.full_name, name),
            level,
            sink: ArcSwap::new(self.sink.load_full()),
        })
    }

    /// Fully-qualified dotted name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Verbosity level of this logger
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Replace this logger's sink (local only, children keep theirs)
    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        self.sink.store(Arc::new(sink));
    }

    /// Whether entries at `level` pass this logger's filter
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Emit an entry if `level` passes the filter
    pub fn log(&self, level: LogLevel, title: Option<&str>, data: Option<Value>) {
        if !self.enabled(level) {
            return;
        }
        self.sink.load().add_entry(LogEntry::new(
            level,
            self.full_name.clone(),
            title.map(str::to_owned),
            data,
        ));
    }

    /// Emit a SPAM entry
    pub fn spam(&self, title: &str) {
        self.log(LogLevel::Spam, Some(title), None);
    }

    /// Emit a SPAM entry with a structured payload
    pub fn spam_with(&self, title: &str, data: Value) {
        self.log(LogLevel::Spam, Some(title), Some(data));
    }

    /// Emit an INFO entry
    pub fn info(&self, title: &str) {
        self.log(LogLevel::Info, Some(title), None);
    }

    /// Emit an INFO entry with a structured payload
    pub fn info_with(&self, title: &str, data: Value) {
        self.log(LogLevel::Info, Some(title), Some(data));
    }

    /// Emit a WARN entry
    pub fn warn(&self, title: &str) {
        self.log(LogLevel::Warn, Some(title), None);
    }

    /// Emit a WARN entry with a structured payload
    pub fn warn_with(&self, title: &str, data: Value) {
        self.log(LogLevel::Warn, Some(title), Some(data));
    }

    /// Emit an ERROR entry
    pub fn error(&self, title: &str) {
        self.log(LogLevel::Error, Some(title), None);
    }

    /// Emit an ERROR entry with a structured payload
    pub fn error_with(&self, title: &str, data: Value) {
        self.log(LogLevel::Error, Some(title), Some(data));
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;
