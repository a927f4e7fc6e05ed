//! Process configuration.
//!
//! Built once from the environment at startup and passed into the
//! supervisor; nothing reads the environment after that.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{NotifierError, Result};

/// Environment variable holding the full webhook URL. Treat as a secret.
pub const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Environment variable selecting the directory to watch.
pub const WATCH_DIRECTORY_VAR: &str = "WATCH_DIRECTORY";

/// Environment variable overriding the base URL used in notification links.
pub const LINK_BASE_URL_VAR: &str = "LINK_BASE_URL";

/// Directory watched when `WATCH_DIRECTORY` is unset.
pub const DEFAULT_WATCH_DIR: &str = "/data";

/// Link base used when `LINK_BASE_URL` is unset. Matches the deployment
/// this notifier was written for.
pub const DEFAULT_LINK_BASE_URL: &str = "http://192.168.5.22:8080/files/hdd2/Octocrate";

/// Configuration for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full webhook URL notifications are posted to.
    pub webhook_url: String,

    /// Directory whose direct children are watched for creation.
    pub watch_dir: PathBuf,

    /// Base URL prepended to event paths when building notification links.
    pub link_base_url: String,

    /// Delays applied between delivery retries.
    pub retry: RetryConfig,
}

impl Config {
    /// Create a configuration with default watch directory and link base.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            watch_dir: PathBuf::from(DEFAULT_WATCH_DIR),
            link_base_url: DEFAULT_LINK_BASE_URL.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// Missing values become their defaults here; [`Config::validate`]
    /// decides whether the result is usable.
    pub fn from_env() -> Self {
        Self {
            webhook_url: env::var(WEBHOOK_URL_VAR).unwrap_or_default(),
            watch_dir: env::var(WATCH_DIRECTORY_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WATCH_DIR)),
            link_base_url: env::var(LINK_BASE_URL_VAR)
                .unwrap_or_else(|_| DEFAULT_LINK_BASE_URL.to_string()),
            retry: RetryConfig::default(),
        }
    }

    /// Set the directory to watch.
    pub fn with_watch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.watch_dir = dir.into();
        self
    }

    /// Set the base URL for notification links.
    pub fn with_link_base_url(mut self, base: impl Into<String>) -> Self {
        self.link_base_url = base.into();
        self
    }

    /// Set the retry delays.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fail-fast validation: the webhook URL must be non-empty and the
    /// watch path must be an existing directory.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.is_empty() {
            return Err(NotifierError::MissingWebhookUrl);
        }
        if !self.watch_dir.exists() {
            return Err(NotifierError::WatchDirNotFound(
                self.watch_dir.display().to_string(),
            ));
        }
        if !self.watch_dir.is_dir() {
            return Err(NotifierError::NotADirectory(
                self.watch_dir.display().to_string(),
            ));
        }
        Ok(())
    }
}

/// Delays applied between delivery retry attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Fixed wait after a transport-level failure (no response received).
    pub transport_retry_delay: Duration,

    /// Wait after HTTP 429 when the `Retry-After` header is missing or
    /// unusable.
    pub rate_limit_fallback: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            transport_retry_delay: Duration::from_secs(5),
            rate_limit_fallback: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Set the transport-failure retry delay.
    pub fn with_transport_retry_delay(mut self, delay: Duration) -> Self {
        self.transport_retry_delay = delay;
        self
    }

    /// Set the rate-limit fallback delay.
    pub fn with_rate_limit_fallback(mut self, delay: Duration) -> Self {
        self.rate_limit_fallback = delay;
        self
    }
}
