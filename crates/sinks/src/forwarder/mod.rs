//! Forwarder sink - cross-context delivery
//!
//! Lets a logger hierarchy in one execution context deliver entries into
//! a sink chain owned by a different, concurrently running context. The
//! two sides share nothing but a message channel with in-order delivery.
//!
//! # Protocol
//!
//! Messages are a tagged variant, never a sniffed union:
//!
//! ```text
//! Entries([e1, e2, ...])   ordered batch, replayed into the local chain
//! Shutdown                 stop processing, release local resources
//! ```
//!
//! The receiving context builds its own sink chain (the factory closure
//! runs inside the spawned task), replays every `Entries` message into
//! it, and stops on `Shutdown`. A batch of one and a single entry take
//! the identical path - the sender wraps singles as a one-element batch.
//!
//! The receiving task never holds the process open by itself; on
//! process-exit notification the sending side proactively posts
//! `Shutdown`.

use tokio::sync::mpsc;

use timber_core::{Lifecycle, LogEntry, Sink};

/// Message crossing the context boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ForwarderMessage {
    /// Ordered batch of entries to replay
    Entries(Vec<LogEntry>),
    /// Stop processing and shut the receiving context down
    Shutdown,
}

/// Sending side: a `Sink` whose destination lives in another context
pub struct ForwarderSink {
    sender: mpsc::UnboundedSender<ForwarderMessage>,
}

impl ForwarderSink {
    /// Spawn the receiving context and return its sending handle
    ///
    /// `make_sink` runs inside the spawned task, so the local sink chain
    /// is owned by the receiving context from the start. Registers a
    /// shutdown notification on the exiting phase.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(lifecycle: &Lifecycle, make_sink: F) -> Self
    where
        F: FnOnce() -> std::sync::Arc<dyn Sink> + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(run_receiver(receiver, make_sink));

        let shutdown_ref = sender.clone();
        lifecycle.on_exiting(move || {
            let _ = shutdown_ref.send(ForwarderMessage::Shutdown);
        });

        Self { sender }
    }

    /// Ask the receiving context to shut down
    pub fn shutdown(&self) {
        let _ = self.sender.send(ForwarderMessage::Shutdown);
    }

    /// Whether the receiving context is still alive
    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }

    fn post(&self, message: ForwarderMessage) {
        if self.sender.send(message).is_err() {
            // Receiver already shut down; entries posted after shutdown
            // are dropped by design.
            tracing::debug!("forwarder channel closed, dropping entries");
        }
    }
}

impl Sink for ForwarderSink {
    fn add_entry(&self, entry: LogEntry) {
        self.post(ForwarderMessage::Entries(vec![entry]));
    }

    fn add_batch(&self, entries: Vec<LogEntry>) {
        self.post(ForwarderMessage::Entries(entries));
    }
}

/// Receiving loop: replay entries until the channel closes or a
/// `Shutdown` arrives
async fn run_receiver<F>(mut receiver: mpsc::UnboundedReceiver<ForwarderMessage>, make_sink: F)
where
    F: FnOnce() -> std::sync::Arc<dyn Sink> + Send + 'static,
{
    let sink = make_sink();

    while let Some(message) = receiver.recv().await {
        match message {
            ForwarderMessage::Shutdown => break,
            ForwarderMessage::Entries(entries) => sink.add_batch(entries),
        }
    }

    // Dropping the receiver closes the channel; senders observe it via
    // failed sends.
    tracing::debug!("forwarder context finished");
}
