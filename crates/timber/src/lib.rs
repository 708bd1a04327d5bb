//! Timber
//!
//! Hierarchical structured logging: named loggers emit leveled entries
//! into a pluggable sink chain, with optional delayed batching, optional
//! cross-context delivery, and file sinks with size-triggered rotation,
//! gzip archiving, and age-based cleanup.
//!
//! # Example
//!
//! ```ignore
//! use timber::{LogRuntime, preset};
//! use timber_core::LogLevel;
//! use timber_sinks::FileSinkConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runtime = LogRuntime::new();
//!     preset::use_file_preset(&runtime, true, false, FileSinkConfig::default());
//!
//!     let log = runtime.root_logger("server", LogLevel::Info);
//!     let http = log.child("http");
//!
//!     http.info("started");
//!     http.error_with("listen failed", serde_json::json!({"port": 8080}));
//!
//!     runtime.shutdown();
//! }
//! ```
//!
//! # Initialization order
//!
//! A `LogRuntime` starts with a buffering default sink, so loggers (and
//! forwarded contexts) can emit entries before the real sink chain is
//! configured; the first `set_default_sink` replays everything buffered,
//! in order.

/// Hierarchical named loggers with level gating
pub mod logger;

/// Buffering default-sink indirection
pub mod default;

/// Process-scoped context: lifecycle, default sink, rotation manager
pub mod runtime;

/// Ready-made sink chains (console/file, delayed, forwarded)
pub mod preset;

pub use default::DefaultSink;
pub use logger::Logger;
pub use runtime::LogRuntime;

pub use timber_core::{LogEntry, LogLevel, Sink};
