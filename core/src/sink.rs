//! Webhook delivery sink.
//!
//! Wraps the HTTP delivery of one notification, including the retry
//! policy the endpoint's rate-limit protocol requires. Failure handling
//! is terminal inside [`Notifier::deliver`]: the caller never sees an
//! error, the event is either delivered or dropped after logging.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

use crate::config::{Config, RetryConfig};
use crate::event::FileEvent;

/// Delivers one notification per file event.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification for `event`. All failures are handled
    /// internally; permanent ones drop the event after logging.
    async fn deliver(&self, event: &FileEvent);
}

/// The message posted for one file event.
///
/// A pure function of the event and the link configuration: building it
/// twice yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Display name of the file (basename).
    pub file_name: String,

    /// Externally reachable link to the file.
    pub link: String,

    /// The `content` field of the webhook payload.
    pub content: String,
}

impl NotificationRequest {
    /// Build the request for `event` with the configured watch root and
    /// link base.
    pub fn from_event(event: &FileEvent, watch_root: &Path, link_base: &str) -> Self {
        let link = notification_link(event.path(), watch_root, link_base);
        let content = format!("🆕 file detected: <{link}> in monitored directory.");

        Self {
            file_name: event.file_name(),
            link,
            content,
        }
    }
}

/// Rewrite an event path into an externally reachable URL: strip the
/// watch-root prefix, prepend the link base, and percent-encode spaces.
/// Only spaces are encoded; every other character passes through.
pub fn notification_link(path: &Path, watch_root: &Path, link_base: &str) -> String {
    let link = match path.strip_prefix(watch_root) {
        Ok(relative) => format!("{link_base}/{}", relative.display()),
        Err(_) => format!("{link_base}{}", path.display()),
    };
    link.replace(' ', "%20")
}

/// Outcome of a single POST attempt.
enum Attempt {
    /// 200 or 204: the notification went through.
    Delivered,

    /// 429: wait the indicated duration, then try again.
    RateLimited(Duration),

    /// No response at all (connection error, timeout, DNS failure).
    TransportFailed(reqwest::Error),

    /// Any other status: the endpoint rejected the request for good.
    Rejected { status: StatusCode, body: String },
}

/// HTTP sink posting notifications to a webhook endpoint.
pub struct WebhookSink {
    /// HTTP client.
    client: reqwest::Client,

    /// Full webhook URL.
    webhook_url: String,

    /// Watched directory, stripped from event paths in links.
    watch_root: PathBuf,

    /// Base URL for notification links.
    link_base_url: String,

    /// Retry delays.
    retry: RetryConfig,
}

impl WebhookSink {
    /// Create a sink from the process configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            watch_root: config.watch_dir.clone(),
            link_base_url: config.link_base_url.clone(),
            retry: config.retry.clone(),
        }
    }

    async fn post(&self, request: &NotificationRequest) -> Attempt {
        let payload = serde_json::json!({ "content": request.content });

        let response = match self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Attempt::TransportFailed(err),
        };

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Attempt::Delivered,
            StatusCode::TOO_MANY_REQUESTS => {
                Attempt::RateLimited(retry_after(&response, self.retry.rate_limit_fallback))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Attempt::Rejected { status, body }
            }
        }
    }
}

/// Wait indicated by a 429 response: the `Retry-After` header in decimal
/// seconds, or `fallback` when the header is missing or unusable.
fn retry_after(response: &reqwest::Response, fallback: Duration) -> Duration {
    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(fallback)
}

#[async_trait]
impl Notifier for WebhookSink {
    async fn deliver(&self, event: &FileEvent) {
        let request = NotificationRequest::from_event(event, &self.watch_root, &self.link_base_url);
        let file_name = request.file_name.as_str();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            debug!("Delivery attempt {attempts} for {file_name}");

            match self.post(&request).await {
                Attempt::Delivered => {
                    info!("Notification sent for {file_name}");
                    return;
                }
                Attempt::TransportFailed(err) => {
                    error!("Error sending webhook for {file_name}: {err}");
                    tokio::time::sleep(self.retry.transport_retry_delay).await;
                }
                Attempt::RateLimited(wait) => {
                    warn!(
                        "Rate limited by webhook endpoint. Waiting {:.2} seconds before retrying...",
                        wait.as_secs_f64()
                    );
                    tokio::time::sleep(wait).await;
                }
                Attempt::Rejected { status, body } => {
                    error!("Unexpected response {status} when sending webhook: {body}");
                    return;
                }
            }
        }
    }
}
