//! Line formatters
//!
//! A formatter turns one entry into one line of text. Formatters must be
//! pure and deterministic, and must not embed newlines - the writing sink
//! appends the line terminator itself.

use chrono::{TimeZone, Utc};

use crate::entry::LogEntry;

/// Formats one entry as one newline-free line
pub type EntryFormatter = fn(&LogEntry) -> String;

/// Format an epoch-milliseconds timestamp as ISO-8601 UTC
/// (`2025-01-15T10:30:45.123Z`)
pub fn format_timestamp(epoch_ms: i64) -> String {
    match Utc.timestamp_millis_opt(epoch_ms).single() {
        Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        None => epoch_ms.to_string(),
    }
}

/// JSON formatter: the whole entry as a single JSON object
pub fn format_json(entry: &LogEntry) -> String {
    // LogEntry contains nothing a JSON serializer can reject
    serde_json::to_string(entry).unwrap_or_default()
}

/// Plain-text formatter:
/// `{date} - {LEVEL} - {title}{logger} |>{data}`
///
/// The title column is padded to 50 characters so the logger name and
/// payload line up across entries.
pub fn format_plain(entry: &LogEntry) -> String {
    let date = format_timestamp(entry.timestamp);
    let title = entry.title.as_deref().unwrap_or("");
    let data = entry
        .data
        .as_ref()
        .map(|d| d.to_string())
        .unwrap_or_default();

    format!(
        "{} - {:<5} - {:<50}{} |>{}",
        date,
        entry.level.as_str(),
        title,
        entry.logger,
        data
    )
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
