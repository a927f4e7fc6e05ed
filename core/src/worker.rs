//! Single-threaded delivery worker.

use tracing::{debug, info};

use crate::queue::{QueueItem, QueueReceiver};
use crate::sink::Notifier;

/// Consumes the event queue and delivers each event through the sink,
/// one at a time. Deliveries never overlap, so notifications go out in
/// creation order; a stuck delivery blocks everything queued behind it,
/// which is the accepted cost of strict ordering.
pub struct DeliveryWorker<N: Notifier> {
    receiver: QueueReceiver,
    sink: N,
}

impl<N: Notifier> DeliveryWorker<N> {
    /// Create a worker consuming `receiver` and delivering through `sink`.
    pub fn new(receiver: QueueReceiver, sink: N) -> Self {
        Self { receiver, sink }
    }

    /// Run until the shutdown sentinel arrives (or every sender is
    /// dropped). Events dequeued before the sentinel are always
    /// delivered before the worker exits.
    pub async fn run(mut self) {
        while let Some(item) = self.receiver.recv().await {
            match item {
                QueueItem::File(event) => {
                    debug!("Processing event for {}", event.file_name());
                    self.sink.deliver(&event).await;
                }
                QueueItem::Shutdown => break,
            }
        }
        info!("Delivery worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FileEvent;
    use crate::queue::{EventQueue, QueueSender};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Sink that records delivered file names.
    #[derive(Clone, Default)]
    struct RecordingSink {
        delivered: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Notifier for RecordingSink {
        async fn deliver(&self, event: &FileEvent) {
            self.delivered.lock().unwrap().push(event.file_name());
        }
    }

    fn enqueue_files(tx: &QueueSender, count: usize) {
        for i in 0..count {
            tx.send(QueueItem::File(FileEvent::new(format!("/data/{i}.txt"))))
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_delivers_every_event_in_order() {
        let (tx, rx) = EventQueue::unbounded();
        let sink = RecordingSink::default();
        let worker = DeliveryWorker::new(rx, sink.clone());

        enqueue_files(&tx, 10);
        tx.send(QueueItem::Shutdown).unwrap();
        worker.run().await;

        let delivered = sink.delivered.lock().unwrap();
        let expected: Vec<String> = (0..10).map(|i| format!("{i}.txt")).collect();
        assert_eq!(*delivered, expected);
    }

    #[tokio::test]
    async fn test_drains_events_queued_before_sentinel() {
        let (tx, rx) = EventQueue::unbounded();
        let sink = RecordingSink::default();
        let worker = DeliveryWorker::new(rx, sink.clone());

        enqueue_files(&tx, 3);
        tx.send(QueueItem::Shutdown).unwrap();
        // Queued after the sentinel; the worker must never see it.
        tx.send(QueueItem::File(FileEvent::new("/data/late.txt")))
            .unwrap();
        worker.run().await;

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 3);
        assert!(!delivered.contains(&"late.txt".to_string()));
    }

    #[tokio::test]
    async fn test_exits_when_all_senders_dropped() {
        let (tx, rx) = EventQueue::unbounded();
        let sink = RecordingSink::default();
        let worker = DeliveryWorker::new(rx, sink.clone());

        enqueue_files(&tx, 1);
        drop(tx);
        worker.run().await;

        assert_eq!(sink.delivered.lock().unwrap().len(), 1);
    }
}
