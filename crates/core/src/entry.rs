//! Log entry model
//!
//! A `LogEntry` is immutable once created: sinks may clone, buffer, and
//! forward entries but never modify them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Severity level of a log entry
///
/// Discriminants are ordered so that a *lower* value means a *higher*
/// severity; the derived ordering follows them. This makes severity
/// checks read as `entry.level <= LogLevel::Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Errors - something failed
    Error = 0,
    /// Warnings - something looks wrong
    Warn = 2,
    /// Normal operation
    Info = 4,
    /// Very verbose output
    Spam = 8,
}

impl LogLevel {
    /// Display name, uppercase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Spam => "SPAM",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log record
///
/// Produced by a `Logger`, carried through the sink chain unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity of this entry
    pub level: LogLevel,

    /// Fully-qualified dotted logger name (e.g. `"server.http.router"`)
    pub logger: String,

    /// Creation time, epoch milliseconds UTC
    pub timestamp: i64,

    /// Optional short label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        level: LogLevel,
        logger: impl Into<String>,
        title: Option<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            level,
            logger: logger.into(),
            timestamp: Utc::now().timestamp_millis(),
            title,
            data,
        }
    }
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod entry_test;
