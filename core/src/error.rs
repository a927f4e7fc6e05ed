//! Error types for the notification pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Errors that can occur in the notification pipeline.
///
/// Per-event delivery failures never appear here: the sink handles them
/// internally (retry or log-and-drop) so the worker loop keeps running.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Webhook URL missing from the environment.
    #[error(
        "DISCORD_WEBHOOK_URL is not set; create a webhook in your channel settings and set this variable to the full URL"
    )]
    MissingWebhookUrl,

    /// Watch directory does not exist.
    #[error("the directory to watch does not exist: {0}")]
    WatchDirNotFound(String),

    /// Watch path exists but is not a directory.
    #[error("the watch path is not a directory: {0}")]
    NotADirectory(String),

    /// Notify error.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Event queue closed before the sender was done with it.
    #[error("event queue closed")]
    QueueClosed,

    /// Delivery worker task failed to join.
    #[error("delivery worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
