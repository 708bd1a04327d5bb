//! Buffer sink - holds entries until a real target exists
//!
//! Isolated execution contexts can receive log entries before their sink
//! chain is wired up. The buffer sink is the safe default target for that
//! window: it queues everything in order, and `drain_to` hands the queue
//! to the real sink once configuration completes.

use parking_lot::Mutex;

use timber_core::{LogEntry, Sink};

/// Ordered in-memory queue of entries
#[derive(Default)]
pub struct BufferSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferSink {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Move all buffered entries to `target`, in original order
    ///
    /// The queue is taken under the lock before the batch is forwarded,
    /// so entries arriving concurrently land in the (now empty) buffer
    /// rather than being lost or duplicated.
    pub fn drain_to(&self, target: &dyn Sink) {
        let drained = std::mem::take(&mut *self.entries.lock());
        if !drained.is_empty() {
            target.add_batch(drained);
        }
    }
}

impl Sink for BufferSink {
    fn add_entry(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
    }

    fn add_batch(&self, entries: Vec<LogEntry>) {
        self.entries.lock().extend(entries);
    }
}
