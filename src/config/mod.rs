//! Configuration for announcers and their execution contexts.
//!
//! # Example
//!
//! ```rust
//! use idiomkit::config::AnnouncerConfig;
//! use std::time::Duration;
//!
//! let config = AnnouncerConfig::new()
//!     .announcer("Beyonce")
//!     .worker_threads(4)
//!     .signal_timeout(Duration::from_secs(1));
//!
//! assert_eq!(config.announcer, "Beyonce");
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Announcer used when none is configured.
pub const DEFAULT_ANNOUNCER: &str = "Taylor Swift";

/// Catchphrase emitted by every announcement.
pub const DEFAULT_CATCHPHRASE: &str = "Your ten year old memes are lame.";

/// Configuration for announcer behavior.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnnouncerConfig {
    /// Initial value of the shared announcer field.
    pub announcer: String,
    /// Text the announcer "says".
    pub catchphrase: String,
    /// Worker threads for the background pool.
    pub worker_threads: usize,
    /// Name given to background worker threads.
    pub thread_name: String,
    /// How long a caller waits on a completion signal before giving up.
    #[serde(rename = "signal_timeout_ms", deserialize_with = "duration_from_millis")]
    pub signal_timeout: Duration,
}

impl AnnouncerConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input and [`Error::Config`] for
    /// values that fail [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive an execution context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `worker_threads` is zero or
    /// `thread_name` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            return Err(Error::config("worker_threads must be at least 1"));
        }
        if self.thread_name.trim().is_empty() {
            return Err(Error::config("thread_name must not be empty"));
        }
        Ok(())
    }

    /// Set the initial announcer.
    #[must_use]
    pub fn announcer(mut self, announcer: impl Into<String>) -> Self {
        self.announcer = announcer.into();
        self
    }

    /// Set the catchphrase.
    #[must_use]
    pub fn catchphrase(mut self, catchphrase: impl Into<String>) -> Self {
        self.catchphrase = catchphrase.into();
        self
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.worker_threads = count;
        self
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the completion signal timeout.
    #[must_use]
    pub fn signal_timeout(mut self, timeout: Duration) -> Self {
        self.signal_timeout = timeout;
        self
    }
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            announcer: DEFAULT_ANNOUNCER.to_string(),
            catchphrase: DEFAULT_CATCHPHRASE.to_string(),
            worker_threads: 2,
            thread_name: "idiomkit-worker".to_string(),
            signal_timeout: Duration::from_secs(5),
        }
    }
}

fn duration_from_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
