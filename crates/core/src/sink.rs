//! The sink capability
//!
//! A `Sink` is any destination that accepts log entries, singly or
//! batched, in order. Every delivery component in timber - console, file,
//! delay, forwarder, buffer - implements this trait and is used as an
//! `Arc<dyn Sink>` so loggers and wrapping sinks can share and swap
//! targets freely.

use crate::entry::LogEntry;

/// Destination for log entries
///
/// # Ordering contract
///
/// Within one sink, entries reach the underlying destination in call
/// order. `add_batch` is equivalent to calling `add_entry` for each
/// element in sequence - implementations may override it for efficiency
/// but must never reorder.
pub trait Sink: Send + Sync {
    /// Accept a single entry
    fn add_entry(&self, entry: LogEntry);

    /// Accept an ordered sequence of entries
    fn add_batch(&self, entries: Vec<LogEntry>) {
        for entry in entries {
            self.add_entry(entry);
        }
    }
}
