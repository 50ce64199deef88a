//! A downloader that never leaves the process.

use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use super::CallTracker;
use crate::error::{Error, Result};
use crate::tweets::ContentDownloader;

/// Response served by [`MockDownloader::new`].
pub const CANNED_SEARCH_RESPONSE: &str = r#"{
  "statuses": [
    {"id": 1, "author": "taylorswift13", "text": "Your ten year old memes are lame."},
    {"id": 2, "author": "kanyewest", "text": "Imma let you finish"},
    {"id": 3, "author": "beyonce", "text": "Who run the world?"}
  ]
}"#;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Failure(String),
}

/// Serves a fixed reply and records every requested location.
///
/// Clones share the reply and the request history.
#[derive(Debug, Clone)]
pub struct MockDownloader {
    reply: Arc<Mutex<Reply>>,
    requests: CallTracker<Url>,
}

impl MockDownloader {
    /// Serves [`CANNED_SEARCH_RESPONSE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_response(CANNED_SEARCH_RESPONSE)
    }

    /// Serves `body`.
    #[must_use]
    pub fn with_response(body: impl Into<String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Reply::Body(body.into()))),
            requests: CallTracker::new(),
        }
    }

    /// Fails every download with [`Error::Mock`].
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_failure(message);
        mock
    }

    /// Serve `body` from now on.
    pub fn set_response(&self, body: impl Into<String>) {
        *self.reply.lock() = Reply::Body(body.into());
    }

    /// Fail from now on.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.reply.lock() = Reply::Failure(message.into());
    }

    /// Every requested location, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Url> {
        self.requests.args()
    }

    /// Number of downloads attempted.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.call_count()
    }

    /// Check if `location` was requested.
    #[must_use]
    pub fn was_asked_for(&self, location: &Url) -> bool {
        self.requests.was_called_with(location)
    }
}

impl Default for MockDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentDownloader for MockDownloader {
    fn download(&self, location: &Url) -> Result<String> {
        self.requests.track(location.clone());
        match &*self.reply.lock() {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Failure(message) => Err(Error::mock(message.clone())),
        }
    }
}
