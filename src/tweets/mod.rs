//! Composition and dependency injection, shown on a tweet list.
//!
//! Fetching tweets is two jobs: downloading raw content and parsing it.
//! [`AllInOneTweetList`] does both itself. [`ComposedTweetList`] hands them to
//! a [`TweetGetter`], which in turn receives its [`ContentDownloader`] and
//! [`ResponseParser`] from the caller. The injected version can be tested
//! with a [`MockDownloader`](crate::mock::MockDownloader). The others can
//! only hit [`ApiCaller`], which refuses to touch the network.
//!
//! ```rust
//! use idiomkit::mock::MockDownloader;
//! use idiomkit::tweets::{search_url, JsonResponseParser, TweetGetter};
//!
//! let getter = TweetGetter::new(MockDownloader::new(), JsonResponseParser);
//! let tweets = getter.get_tweets(&search_url().unwrap()).unwrap();
//! assert!(!tweets.is_empty());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

mod controller;
mod getter;

pub use controller::{AllInOneTweetList, ComposedTweetList};
pub use getter::{StiffTweetGetter, TweetGetter};

/// Default search endpoint. Only ever used as a location value.
pub const SEARCH_URL: &str = "https://api.twitter.com/1.1/search/tweets.json";

/// Parsed [`SEARCH_URL`].
///
/// # Errors
///
/// Returns [`Error::Parse`] if the constant stops being a valid URL.
pub fn search_url() -> Result<Url> {
    Url::parse(SEARCH_URL).map_err(|e| Error::parse(format!("{SEARCH_URL}: {e}")))
}

/// A single tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet id.
    pub id: u64,
    /// Screen name of the author.
    pub author: String,
    /// Body text.
    pub text: String,
}

/// Downloads raw content given a location.
pub trait ContentDownloader {
    /// Fetch the content at `location`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; see each implementor.
    fn download(&self, location: &Url) -> Result<String>;
}

impl<D: ContentDownloader + ?Sized> ContentDownloader for Arc<D> {
    fn download(&self, location: &Url) -> Result<String> {
        (**self).download(location)
    }
}

impl<D: ContentDownloader + ?Sized> ContentDownloader for Box<D> {
    fn download(&self, location: &Url) -> Result<String> {
        (**self).download(location)
    }
}

/// Turns raw content into tweets.
pub trait ResponseParser {
    /// Parse `raw` into tweets.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a response this parser understands.
    fn parse_tweets(&self, raw: &str) -> Result<Vec<Tweet>>;
}

/// Parses search responses of the form `{"statuses": [...]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseParser;

#[derive(Deserialize)]
struct SearchResponse {
    statuses: Vec<Tweet>,
}

impl ResponseParser for JsonResponseParser {
    fn parse_tweets(&self, raw: &str) -> Result<Vec<Tweet>> {
        let response: SearchResponse = serde_json::from_str(raw)?;
        Ok(response.statuses)
    }
}

/// The production downloader.
///
/// Remote calls are out of scope for this crate, so every download fails with
/// [`Error::Network`]. Code that constructs one internally cannot be tested
/// offline, which is the point of the lesson.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiCaller;

impl ContentDownloader for ApiCaller {
    fn download(&self, location: &Url) -> Result<String> {
        tracing::debug!(%location, "api caller refused remote download");
        Err(Error::network(format!(
            "remote download of {location} is not available"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TWEETS: &str = r#"{
        "statuses": [
            {"id": 1, "author": "taylorswift13", "text": "Hello"},
            {"id": 2, "author": "kanyewest", "text": "Imma let you finish"}
        ]
    }"#;

    #[test]
    fn test_search_url_parses() {
        let url = search_url().unwrap();
        assert_eq!(url.host_str(), Some("api.twitter.com"));
        assert_eq!(url.path(), "/1.1/search/tweets.json");
    }

    #[test]
    fn test_json_parser() {
        let tweets = JsonResponseParser.parse_tweets(TWO_TWEETS).unwrap();

        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[1].author, "kanyewest");
    }

    #[test]
    fn test_json_parser_rejects_garbage() {
        let err = JsonResponseParser.parse_tweets("<html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_parser_empty_statuses() {
        assert!(JsonResponseParser
            .parse_tweets(r#"{"statuses": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_api_caller_never_downloads() {
        let err = ApiCaller.download(&search_url().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.to_string().contains("api.twitter.com"));
    }

    #[test]
    fn test_boxed_downloader_delegates() {
        let boxed: Box<dyn ContentDownloader> = Box::new(ApiCaller);
        assert!(boxed.download(&search_url().unwrap()).is_err());
    }
}
