//! Buffering default-sink indirection
//!
//! Loggers are created before application wiring completes - especially
//! in forwarded contexts, which can receive entries while still
//! initializing. The default sink gives every logger a safe, always
//! present target: entries buffer in memory until the first real sink is
//! installed, then replay into it in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;

use timber_core::{LogEntry, Sink};
use timber_sinks::BufferSink;

/// The always-present delivery target backing unconfigured loggers
///
/// Starts at an internal `BufferSink`. The first `redirect_to` drains
/// the buffer into the new target (in order, exactly once) and installs
/// it; later calls just swap the target - nothing is buffered anymore.
pub struct DefaultSink {
    active: ArcSwap<Arc<dyn Sink>>,
    buffer: Arc<BufferSink>,
    redirected: AtomicBool,
}

impl DefaultSink {
    /// Create an indirection whose initial target is a fresh buffer
    pub fn new() -> Self {
        let buffer = Arc::new(BufferSink::new());
        let initial: Arc<dyn Sink> = buffer.clone();
        Self {
            active: ArcSwap::new(Arc::new(initial)),
            buffer,
            redirected: AtomicBool::new(false),
        }
    }

    /// Install `sink` as the active target
    ///
    /// Only the first call consumes the startup buffer; the flush happens
    /// before the swap so buffered entries stay ahead of new ones.
    pub fn redirect_to(&self, sink: Arc<dyn Sink>) {
        if !self.redirected.swap(true, Ordering::SeqCst) {
            self.buffer.drain_to(&*sink);
        }
        self.active.store(Arc::new(sink));
    }

    /// Number of entries still waiting for the first redirect
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether a real sink has been installed
    pub fn is_redirected(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    /// The currently active target
    pub fn target(&self) -> Arc<dyn Sink> {
        Arc::clone(&*self.active.load_full())
    }
}

impl Default for DefaultSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for DefaultSink {
    fn add_entry(&self, entry: LogEntry) {
        self.active.load().add_entry(entry);
    }

    fn add_batch(&self, entries: Vec<LogEntry>) {
        self.active.load().add_batch(entries);
    }
}

#[cfg(test)]
#[path = "default_test.rs"]
mod default_test;
