//! Tweet list controllers: monolithic and composed.

use url::Url;

use super::{ApiCaller, ContentDownloader, JsonResponseParser, ResponseParser, Tweet, TweetGetter};
use crate::error::Result;

/// Downloads, parses and displays on its own.
///
/// Every step is a private method, so none can be replaced without replacing
/// the controller.
#[derive(Debug, Clone)]
pub struct AllInOneTweetList {
    url: Url,
    tweets: Vec<Tweet>,
}

impl AllInOneTweetList {
    /// Creates a list for `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tweets: Vec::new(),
        }
    }

    /// Fetch tweets and store them for display.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Network`](crate::Error::Network) because the
    /// built-in download step cannot reach anything.
    pub fn load(&mut self) -> Result<usize> {
        let tweets = self.get_tweets()?;
        self.tweets = tweets;
        Ok(self.tweets.len())
    }

    /// Tweets currently on display.
    #[must_use]
    pub fn displayed(&self) -> &[Tweet] {
        &self.tweets
    }

    fn get_tweets(&self) -> Result<Vec<Tweet>> {
        let raw = self.download_tweets()?;
        self.parse_tweets(&raw)
    }

    fn download_tweets(&self) -> Result<String> {
        ApiCaller.download(&self.url)
    }

    fn parse_tweets(&self, raw: &str) -> Result<Vec<Tweet>> {
        JsonResponseParser.parse_tweets(raw)
    }
}

/// Displays tweets fetched by a [`TweetGetter`].
#[derive(Debug, Clone)]
pub struct ComposedTweetList<D, P> {
    url: Url,
    getter: TweetGetter<D, P>,
    tweets: Vec<Tweet>,
}

impl<D: ContentDownloader, P: ResponseParser> ComposedTweetList<D, P> {
    /// Creates a list for `url` backed by `getter`.
    pub fn new(url: Url, getter: TweetGetter<D, P>) -> Self {
        Self {
            url,
            getter,
            tweets: Vec::new(),
        }
    }

    /// Fetch tweets and store them for display.
    ///
    /// On failure the previously displayed tweets are kept.
    ///
    /// # Errors
    ///
    /// Propagates the getter's error.
    pub fn load(&mut self) -> Result<usize> {
        self.tweets = self.getter.get_tweets(&self.url)?;
        Ok(self.tweets.len())
    }

    /// Tweets currently on display.
    #[must_use]
    pub fn displayed(&self) -> &[Tweet] {
        &self.tweets
    }

    /// The getter doing the work.
    pub fn getter(&self) -> &TweetGetter<D, P> {
        &self.getter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tweets::search_url;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Hands out queued responses, one per download.
    struct Sequence(Mutex<VecDeque<Result<String>>>);

    impl Sequence {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self(Mutex::new(responses.into()))
        }
    }

    impl ContentDownloader for Sequence {
        fn download(&self, _location: &Url) -> Result<String> {
            self.0
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::mock("no response queued")))
        }
    }

    const ONE_TWEET: &str = r#"{"statuses": [{"id": 1, "author": "poppy", "text": "It's Poppy"}]}"#;

    #[test]
    fn test_all_in_one_cannot_load_offline() {
        let mut list = AllInOneTweetList::new(search_url().unwrap());

        assert!(matches!(list.load(), Err(Error::Network(_))));
        assert!(list.displayed().is_empty());
    }

    #[test]
    fn test_composed_list_loads_through_getter() {
        let getter = TweetGetter::new(
            Sequence::new(vec![Ok(ONE_TWEET.to_string())]),
            JsonResponseParser,
        );
        let mut list = ComposedTweetList::new(search_url().unwrap(), getter);

        assert_eq!(list.load().unwrap(), 1);
        assert_eq!(list.displayed()[0].text, "It's Poppy");
    }

    #[test]
    fn test_composed_list_keeps_tweets_on_failure() {
        let getter = TweetGetter::new(
            Sequence::new(vec![Ok(ONE_TWEET.to_string()), Err(Error::mock("offline"))]),
            JsonResponseParser,
        );
        let mut list = ComposedTweetList::new(search_url().unwrap(), getter);

        list.load().unwrap();
        assert!(matches!(list.load(), Err(Error::Mock(_))));
        assert_eq!(list.displayed().len(), 1);
    }
}
