//! Timber - Core
//!
//! Shared building blocks for the timber logging pipeline: the entry model,
//! the `Sink` trait every delivery component implements, line formatters,
//! and the process-lifecycle notifier.
//!
//! # Architecture
//!
//! ```text
//! [Logger] --LogEntry--> [Sink] --> [Sink] --> ... --> [Destination]
//! ```
//!
//! Sinks compose: a delaying sink wraps a forwarding sink wraps a file
//! sink. Every stage accepts entries singly or batched, in order, through
//! the same `Sink` trait.

/// Log entry model: levels and the immutable entry record
pub mod entry;

/// The `Sink` capability implemented by every delivery component
pub mod sink;

/// Line formatters (JSON, plain text) and timestamp display
pub mod format;

/// Process-lifecycle notifier (exiting / exited / hot-reload hooks)
pub mod lifecycle;

pub use entry::{LogEntry, LogLevel};
pub use format::{format_json, format_plain, format_timestamp, EntryFormatter};
pub use lifecycle::Lifecycle;
pub use sink::Sink;
