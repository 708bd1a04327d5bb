//! Timber - Sinks
//!
//! Delivery sinks for the timber logging pipeline.
//!
//! # Architecture
//!
//! Sinks implement `timber_core::Sink` and compose into chains. The hot
//! path (`add_entry`) is synchronous and never awaits; slow work runs in
//! background tokio tasks:
//!
//! ```text
//! [Logger] --> [DelaySink] --> [ForwarderSink] ~~channel~~> [FileSink]
//!                                                               |
//!                                              [Rotator] <-- size poll
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Purpose | Background task |
//! |------|---------|-----------------|
//! | `console` | Human-readable stdout output | No |
//! | `null` | Discard all (tests, presets) | No |
//! | `buffer` | Hold entries until a target exists | No |
//! | `delay` | Batch bursts over a time window | Flush timer |
//! | `file` | Line-oriented persistence | No (rotation is external) |
//! | `forwarder` | Deliver into another execution context | Receiving loop |
//!
//! The `rotation` module drives size-triggered rotation of registered
//! file sinks from a shared poll task; `retention` deletes aged files on
//! an hourly sweep.

/// Console sink - colored, human-readable stdout output
pub mod console;

/// Null sink - discards all entries
pub mod null;

/// Buffer sink - holds entries until a real target exists
pub mod buffer;

/// Delay sink - batches bursts, flushes on severity or timer
pub mod delay;

/// File sink - append-mode line persistence with open/closed buffering
pub mod file;

/// Rotation manager - size polling, rename, gzip, cleanup notification
pub mod rotation;

/// Retention sweeper - age-based deletion of rotated files
pub mod retention;

/// Forwarder sink - cross-context delivery over a message channel
pub mod forwarder;

/// Common types shared by all sinks (errors)
mod common;

pub use buffer::BufferSink;
pub use common::SinkError;
pub use console::{format_colored, ConsoleSink};
pub use delay::{DelayConfig, DelaySink};
pub use file::{FileSink, FileSinkConfig, RotatePolicy};
pub use forwarder::{ForwarderMessage, ForwarderSink};
pub use null::NullSink;
pub use retention::start_sweeper;
pub use rotation::{RotationClient, Rotator};
