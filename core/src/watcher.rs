//! Directory watcher feeding the event queue.

use std::path::PathBuf;

use notify::event::CreateKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::event::FileEvent;
use crate::queue::{QueueItem, QueueSender};

/// Watches one directory (direct children only) and enqueues a
/// [`FileEvent`] for every file created in it.
///
/// The notify callback runs on notify's own dispatch thread; the queue's
/// unbounded sender is the only thing it touches.
pub struct DirectoryWatcher {
    /// Directory being watched.
    dir: PathBuf,

    /// Queue the watcher produces into.
    queue: QueueSender,

    /// Internal notify watcher, present while running.
    watcher: Option<RecommendedWatcher>,
}

impl DirectoryWatcher {
    /// Create a watcher for `dir` producing into `queue`.
    pub fn new(dir: impl Into<PathBuf>, queue: QueueSender) -> Self {
        Self {
            dir: dir.into(),
            queue,
            watcher: None,
        }
    }

    /// Start watching. `failure` is cancelled if the watch mechanism
    /// reports an error after startup, so the supervisor can shut down in
    /// order instead of hanging.
    pub fn start(&mut self, failure: CancellationToken) -> Result<()> {
        let queue = self.queue.clone();

        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let EventKind::Create(kind) = event.kind else {
                        return;
                    };

                    for path in event.paths {
                        // Subdirectory creations are not files; skip them.
                        if matches!(kind, CreateKind::Folder) || path.is_dir() {
                            debug!("Ignoring directory creation: {}", path.display());
                            continue;
                        }

                        if let Err(e) = queue.send(QueueItem::File(FileEvent::new(path))) {
                            error!("Failed to enqueue file event: {e}");
                        }
                    }
                }
                Err(e) => {
                    error!("Watch error: {e}");
                    failure.cancel();
                }
            },
        )?;

        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);
        info!("Watching directory: {}", self.dir.display());

        Ok(())
    }

    /// Stop watching and tear down the notify backend. After this
    /// returns no further events are produced.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            let _ = watcher.unwatch(&self.dir);
        }
        info!("Directory watcher stopped");
    }

    /// Whether the watcher is currently running.
    pub fn is_running(&self) -> bool {
        self.watcher.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventQueue;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn next_file_event(rx: &mut crate::queue::QueueReceiver) -> Option<FileEvent> {
        match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
            Ok(Some(QueueItem::File(event))) => Some(event),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_watcher_lifecycle() {
        let temp = TempDir::new().unwrap();
        let (tx, _rx) = EventQueue::unbounded();
        let mut watcher = DirectoryWatcher::new(temp.path(), tx);

        assert!(!watcher.is_running());
        watcher.start(CancellationToken::new()).unwrap();
        assert!(watcher.is_running());
        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn test_start_on_missing_directory_fails() {
        let (tx, _rx) = EventQueue::unbounded();
        let mut watcher = DirectoryWatcher::new("/nonexistent/path/12345", tx);

        let result = watcher.start(CancellationToken::new());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_creation_is_enqueued() {
        let temp = TempDir::new().unwrap();
        let (tx, mut rx) = EventQueue::unbounded();
        let mut watcher = DirectoryWatcher::new(temp.path(), tx);
        watcher.start(CancellationToken::new()).unwrap();

        std::fs::write(temp.path().join("fresh.txt"), "hello").unwrap();

        let event = next_file_event(&mut rx).await.expect("no event received");
        assert_eq!(event.file_name(), "fresh.txt");

        watcher.stop();
    }

    #[tokio::test]
    async fn test_directory_creation_is_ignored() {
        let temp = TempDir::new().unwrap();
        let (tx, mut rx) = EventQueue::unbounded();
        let mut watcher = DirectoryWatcher::new(temp.path(), tx);
        watcher.start(CancellationToken::new()).unwrap();

        std::fs::create_dir(temp.path().join("subdir")).unwrap();
        std::fs::write(temp.path().join("after.txt"), "hello").unwrap();

        // The first file event to arrive must be the file, not the
        // directory created before it.
        let event = next_file_event(&mut rx).await.expect("no event received");
        assert_eq!(event.file_name(), "after.txt");

        watcher.stop();
    }
}
