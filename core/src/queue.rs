//! Handoff queue between the watcher and the delivery worker.
//!
//! Unbounded on purpose: the producer side runs on notify's internal
//! dispatch thread, which must never block on a full channel.

use tokio::sync::mpsc;

use crate::error::{NotifierError, Result};
use crate::event::FileEvent;

/// An item carried on the event queue.
#[derive(Debug, Clone)]
pub enum QueueItem {
    /// A file creation to deliver.
    File(FileEvent),

    /// Sentinel telling the worker to finish draining and exit.
    ///
    /// Enqueued exactly once, after the watcher has stopped producing.
    Shutdown,
}

/// FIFO multi-producer/single-consumer queue of [`QueueItem`]s.
pub struct EventQueue;

impl EventQueue {
    /// Create a connected sender/receiver pair.
    pub fn unbounded() -> (QueueSender, QueueReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueueSender { tx }, QueueReceiver { rx })
    }
}

/// Producer handle. Cloneable; `send` never blocks.
#[derive(Clone)]
pub struct QueueSender {
    tx: mpsc::UnboundedSender<QueueItem>,
}

impl QueueSender {
    /// Enqueue an item. Fails only once the receiver is gone.
    pub fn send(&self, item: QueueItem) -> Result<()> {
        self.tx.send(item).map_err(|_| NotifierError::QueueClosed)
    }
}

/// Consumer handle for the single delivery worker.
pub struct QueueReceiver {
    rx: mpsc::UnboundedReceiver<QueueItem>,
}

impl QueueReceiver {
    /// Await the next item in enqueue order. `None` means every sender
    /// has been dropped.
    pub async fn recv(&mut self) -> Option<QueueItem> {
        self.rx.recv().await
    }
}
