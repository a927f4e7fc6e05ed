//! # watchhook-core
//!
//! Watches a single directory for newly created files and announces each
//! one to a webhook endpoint, respecting the endpoint's rate-limit
//! protocol.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         watchhook                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  DirectoryWatcher ──► EventQueue ──► DeliveryWorker             │
//! │        │                  │                │                    │
//! │        ▼                  ▼                ▼                    │
//! │  notify backend      FIFO handoff     WebhookSink ──► endpoint  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The queue is the only shared state. The watcher produces into it from
//! notify's dispatch thread; one worker consumes it and delivers strictly
//! in order, one notification at a time. The [`Supervisor`] owns the
//! lifecycle: validate config, start watcher, spawn worker, and on
//! shutdown stop the watcher before enqueueing the sentinel so no event
//! is lost.

pub mod config;
pub mod error;
pub mod event;
pub mod queue;
pub mod signals;
pub mod sink;
pub mod supervisor;
pub mod watcher;
pub mod worker;

pub use config::{Config, RetryConfig};
pub use error::{NotifierError, Result};
pub use event::FileEvent;
pub use queue::{EventQueue, QueueItem, QueueReceiver, QueueSender};
pub use sink::{NotificationRequest, Notifier, WebhookSink, notification_link};
pub use supervisor::Supervisor;
pub use watcher::DirectoryWatcher;
pub use worker::DeliveryWorker;
