//! Process-lifecycle notifier
//!
//! Sinks need three moments in the process lifetime: "about to exit"
//! (flush pending batches), "has exited" (close handles, now that pending
//! writes have been flushed), and "hot reload" (the process is being
//! replaced; stop rescheduling timers). `Lifecycle` is the explicit,
//! process-scoped registry for those hooks - constructed once by the
//! runtime and passed by reference to the components that need it.

use parking_lot::Mutex;

type Callback = Box<dyn Fn() + Send + Sync>;

/// Registry of process-lifecycle callbacks
///
/// Callbacks fire synchronously, in registration order. Notification
/// methods are idempotent only in the sense that firing twice runs the
/// callbacks twice - callers are expected to notify each phase once.
#[derive(Default)]
pub struct Lifecycle {
    exiting: Mutex<Vec<Callback>>,
    exited: Mutex<Vec<Callback>>,
    hot_reload: Mutex<Vec<Callback>>,
}

impl Lifecycle {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for "process is about to exit"
    ///
    /// Fires before teardown; the place for final flushes.
    pub fn on_exiting(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.exiting.lock().push(Box::new(callback));
    }

    /// Register a callback for "process has exited"
    ///
    /// Fires after the exiting phase completed, once pending writes have
    /// been flushed; the place to close handles.
    pub fn on_exited(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.exited.lock().push(Box::new(callback));
    }

    /// Register a callback for "the process is being hot-reloaded"
    pub fn on_hot_reload(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.hot_reload.lock().push(Box::new(callback));
    }

    /// Fire the "exiting" callbacks in registration order
    pub fn notify_exiting(&self) {
        for callback in self.exiting.lock().iter() {
            callback();
        }
    }

    /// Fire the "exited" callbacks in registration order
    pub fn notify_exited(&self) {
        for callback in self.exited.lock().iter() {
            callback();
        }
    }

    /// Fire the "hot reload" callbacks in registration order
    pub fn notify_hot_reload(&self) {
        for callback in self.hot_reload.lock().iter() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_callbacks_fire_in_registration_order() {
        let lifecycle = Lifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            lifecycle.on_exiting(move || order.lock().push(i));
        }

        lifecycle.notify_exiting();
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_phases_are_independent() {
        let lifecycle = Lifecycle::new();
        let exiting = Arc::new(AtomicUsize::new(0));
        let exited = Arc::new(AtomicUsize::new(0));

        {
            let exiting = Arc::clone(&exiting);
            lifecycle.on_exiting(move || {
                exiting.fetch_add(1, Ordering::SeqCst);
            });
        }
        {
            let exited = Arc::clone(&exited);
            lifecycle.on_exited(move || {
                exited.fetch_add(1, Ordering::SeqCst);
            });
        }

        lifecycle.notify_exiting();
        assert_eq!(exiting.load(Ordering::SeqCst), 1);
        assert_eq!(exited.load(Ordering::SeqCst), 0);

        lifecycle.notify_exited();
        assert_eq!(exited.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hot_reload_fires_registered_callbacks() {
        let lifecycle = Lifecycle::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        lifecycle.on_hot_reload(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        lifecycle.notify_hot_reload();
        lifecycle.notify_hot_reload();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
