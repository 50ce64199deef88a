//! Tweet getters with and without injected collaborators.

use url::Url;

use super::{ApiCaller, ContentDownloader, JsonResponseParser, ResponseParser, Tweet};
use crate::error::Result;

/// Downloads then parses, using collaborators supplied by the caller.
#[derive(Debug, Clone)]
pub struct TweetGetter<D, P> {
    downloader: D,
    parser: P,
}

impl<D: ContentDownloader, P: ResponseParser> TweetGetter<D, P> {
    /// Inject the collaborators.
    pub fn new(downloader: D, parser: P) -> Self {
        Self { downloader, parser }
    }

    /// Fetch and parse the tweets at `url`.
    ///
    /// # Errors
    ///
    /// Propagates download and parse failures unchanged.
    pub fn get_tweets(&self, url: &Url) -> Result<Vec<Tweet>> {
        let raw = self.downloader.download(url)?;
        let tweets = self.parser.parse_tweets(&raw)?;
        tracing::debug!(%url, count = tweets.len(), "tweets fetched");
        Ok(tweets)
    }

    /// The injected downloader.
    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// The injected parser.
    pub fn parser(&self) -> &P {
        &self.parser
    }
}

/// Builds its own collaborators, so a test cannot swap them.
#[derive(Debug, Clone, Default)]
pub struct StiffTweetGetter {
    api_caller: ApiCaller,
    response_parser: JsonResponseParser,
}

impl StiffTweetGetter {
    /// Creates a getter wired to [`ApiCaller`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and parse the tweets at `url`.
    ///
    /// # Errors
    ///
    /// Always [`Error::Network`](crate::Error::Network), from the built-in
    /// [`ApiCaller`].
    pub fn get_tweets(&self, url: &Url) -> Result<Vec<Tweet>> {
        let raw = self.api_caller.download(url)?;
        self.response_parser.parse_tweets(&raw)
    }
}
