//! Delay sink - batches bursts of entries
//!
//! Wraps a base sink and holds entries over a short window so that bursty
//! logging turns into one batched delivery, which matters for sinks with
//! per-call I/O. Warnings and errors skip the window: they are flushed
//! synchronously before `add_entry` returns, so severe entries are never
//! sitting in memory when something goes wrong right after.
//!
//! The flush timer is a background tokio task. It never holds the process
//! open: on process-exit notification the pending window is replaced by an
//! immediate synchronous flush.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use timber_core::{Lifecycle, LogEntry, LogLevel, Sink};

/// Configuration for the delay sink
#[derive(Debug, Clone)]
pub struct DelayConfig {
    /// How long to hold entries before flushing (default: 2 s)
    pub delay: Duration,

    /// Flush immediately when an ERROR entry arrives (default: true)
    pub flush_on_error: bool,

    /// Flush immediately when a WARN entry arrives (default: true)
    pub flush_on_warn: bool,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            flush_on_error: true,
            flush_on_warn: true,
        }
    }
}

impl DelayConfig {
    /// Set the batching window
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Enable or disable the immediate flush on ERROR entries
    #[must_use]
    pub fn with_flush_on_error(mut self, enabled: bool) -> Self {
        self.flush_on_error = enabled;
        self
    }

    /// Enable or disable the immediate flush on WARN entries
    #[must_use]
    pub fn with_flush_on_warn(mut self, enabled: bool) -> Self {
        self.flush_on_warn = enabled;
        self
    }
}

/// Sink that batches entries over a time window
///
/// Entries queue in arrival order; a single pending timer flushes the
/// queue to the base sink after the configured delay. WARN/ERROR entries
/// flush synchronously when the matching flag is set.
pub struct DelaySink {
    base: Arc<dyn Sink>,
    config: DelayConfig,
    queue: Mutex<Vec<LogEntry>>,
    timer_pending: AtomicBool,
    weak: Weak<DelaySink>,
}

impl DelaySink {
    /// Create a delay sink wrapping `base`
    ///
    /// Registers a final flush on the exiting phase so a graceful
    /// shutdown never loses the pending window.
    pub fn new(base: Arc<dyn Sink>, config: DelayConfig, lifecycle: &Lifecycle) -> Arc<Self> {
        let sink = Arc::new_cyclic(|weak| Self {
            base,
            config,
            queue: Mutex::new(Vec::new()),
            timer_pending: AtomicBool::new(false),
            weak: weak.clone(),
        });

        let flush_ref = Arc::downgrade(&sink);
        lifecycle.on_exiting(move || {
            if let Some(sink) = flush_ref.upgrade() {
                sink.flush();
            }
        });

        sink
    }

    /// Drain the queue to the base sink, in order
    ///
    /// Clears the pending-timer flag first so the next queued entry
    /// starts a fresh window. An empty queue is a no-op.
    pub fn flush(&self) {
        self.timer_pending.store(false, Ordering::SeqCst);

        let drained = std::mem::take(&mut *self.queue.lock());
        if drained.is_empty() {
            return;
        }
        self.base.add_batch(drained);
    }

    /// Number of entries currently held
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether this entry's severity forces an immediate flush
    fn must_flush_now(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error => self.config.flush_on_error,
            LogLevel::Warn => self.config.flush_on_warn,
            _ => false,
        }
    }

    /// Start the flush timer if none is pending
    fn arm_timer(&self) {
        if self.timer_pending.swap(true, Ordering::SeqCst) {
            return;
        }

        let weak = self.weak.clone();
        let delay = self.config.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sink) = weak.upgrade() {
                sink.flush();
            }
        });
    }
}

impl Sink for DelaySink {
    fn add_entry(&self, entry: LogEntry) {
        let level = entry.level;
        self.queue.lock().push(entry);

        if self.must_flush_now(level) {
            self.flush();
            return;
        }

        self.arm_timer();
    }
}
