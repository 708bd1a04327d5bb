//! Process-scoped logging context
//!
//! One `LogRuntime` per process (or per isolated execution context)
//! replaces the usual pile of module globals. Construction order is
//! fixed and documented: the lifecycle registry first, then the
//! buffering default sink (so entries have somewhere safe to go before
//! any real sink exists), then the rotation manager wired to the
//! lifecycle.

use std::sync::Arc;

use timber_core::{Lifecycle, LogLevel, Sink};
use timber_sinks::Rotator;

use crate::default::DefaultSink;
use crate::logger::Logger;

/// Owner of the process-wide logging state
pub struct LogRuntime {
    lifecycle: Arc<Lifecycle>,
    default: Arc<DefaultSink>,
    rotator: Arc<Rotator>,
}

impl LogRuntime {
    /// Create the context
    ///
    /// Must be called from within a tokio runtime (background timers are
    /// tokio tasks).
    pub fn new() -> Arc<Self> {
        let lifecycle = Arc::new(Lifecycle::new());
        let default = Arc::new(DefaultSink::new());
        let rotator = Rotator::new(&lifecycle);

        Arc::new(Self {
            lifecycle,
            default,
            rotator,
        })
    }

    /// The process-lifecycle registry
    pub fn lifecycle(&self) -> &Arc<Lifecycle> {
        &self.lifecycle
    }

    /// The buffering default-sink indirection
    pub fn default_sink(&self) -> &Arc<DefaultSink> {
        &self.default
    }

    /// The rotation manager
    pub fn rotator(&self) -> &Arc<Rotator> {
        &self.rotator
    }

    /// Install `sink` as the default target
    ///
    /// The first installation replays entries buffered since startup.
    pub fn set_default_sink(&self, sink: Arc<dyn Sink>) {
        self.default.redirect_to(sink);
    }

    /// Create a root logger targeting the default indirection
    ///
    /// The logger follows later default-sink changes automatically,
    /// because its target is the indirection itself.
    pub fn root_logger(&self, name: impl Into<String>, level: LogLevel) -> Arc<Logger> {
        Logger::root(name, level, self.default.clone())
    }

    /// Announce a hot reload: rotation polling stops, sinks flush
    pub fn hot_reload(&self) {
        self.lifecycle.notify_hot_reload();
    }

    /// Graceful shutdown: flush, then close
    ///
    /// Two phases, in order: *exiting* (delay sinks flush their windows,
    /// forwarded contexts receive shutdown, rotation clients flush), then
    /// *exited* (file sinks drain anything still buffered and close their
    /// handles). Entries logged after shutdown are buffered or dropped.
    pub fn shutdown(&self) {
        self.lifecycle.notify_exiting();
        self.lifecycle.notify_exited();
    }
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;
