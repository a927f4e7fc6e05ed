//! Pipeline supervisor: wiring, lifecycle, and ordered shutdown.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::queue::{EventQueue, QueueItem};
use crate::signals;
use crate::sink::WebhookSink;
use crate::watcher::DirectoryWatcher;
use crate::worker::DeliveryWorker;

/// Owns the queue and both pipeline halves for one run.
///
/// Construction validates the configuration; nothing is started until
/// [`Supervisor::run`] (or [`Supervisor::run_until`]) is called.
pub struct Supervisor {
    config: Config,
}

impl Supervisor {
    /// Validate `config` and build the supervisor. No component starts
    /// if validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the pipeline until the process receives a termination signal,
    /// then drain and stop.
    pub async fn run(self) -> Result<()> {
        let shutdown = signals::wait_for_shutdown_signal();
        self.run_until(shutdown).await
    }

    /// Run the pipeline until `shutdown` completes.
    ///
    /// Shutdown order matters: the watcher is stopped first so no more
    /// events can be produced, then exactly one sentinel is enqueued,
    /// then the worker is awaited while it drains everything queued
    /// before the sentinel.
    pub async fn run_until<F, T>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = T>,
    {
        let (tx, rx) = EventQueue::unbounded();
        let sink = WebhookSink::new(&self.config);
        let mut watcher = DirectoryWatcher::new(self.config.watch_dir.clone(), tx.clone());

        let watch_failed = CancellationToken::new();
        watcher.start(watch_failed.clone())?;

        let worker = tokio::spawn(DeliveryWorker::new(rx, sink).run());

        tokio::select! {
            _ = shutdown => {
                info!("Shutdown requested. Stopping watcher...");
            }
            _ = watch_failed.cancelled() => {
                error!("Watch source failed. Stopping...");
            }
        }

        watcher.stop();
        tx.send(QueueItem::Shutdown)?;
        worker.await?;

        info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifierError;
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_missing_webhook_url() {
        let temp = TempDir::new().unwrap();
        let config = Config::new("").with_watch_dir(temp.path());

        let result = Supervisor::new(config);
        assert!(matches!(result, Err(NotifierError::MissingWebhookUrl)));
    }

    #[test]
    fn test_new_rejects_missing_watch_dir() {
        let config =
            Config::new("https://discord.test/webhook").with_watch_dir("/nonexistent/path/12345");

        let result = Supervisor::new(config);
        assert!(matches!(result, Err(NotifierError::WatchDirNotFound(_))));
    }

    #[tokio::test]
    async fn test_run_until_drains_and_exits() {
        let temp = TempDir::new().unwrap();
        let config = Config::new("https://discord.test/webhook").with_watch_dir(temp.path());
        let supervisor = Supervisor::new(config).unwrap();

        // Immediate shutdown: nothing was created, nothing to drain.
        supervisor.run_until(async {}).await.unwrap();
    }
}
