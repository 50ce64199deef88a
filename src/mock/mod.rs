//! Test doubles.
//!
//! - [`CallTracker`] - records the arguments of each call
//! - [`Spy`] - wraps a function and records arguments and results
//! - [`MockDownloader`] - a [`ContentDownloader`](crate::tweets::ContentDownloader)
//!   that serves a built-in response instead of touching the network
//!
//! ```rust
//! use idiomkit::mock::MockDownloader;
//! use idiomkit::tweets::{search_url, ContentDownloader};
//!
//! let mock = MockDownloader::new();
//! let url = search_url().unwrap();
//! mock.download(&url).unwrap();
//!
//! assert!(mock.was_asked_for(&url));
//! ```

mod downloader;
mod spy;

pub use downloader::{MockDownloader, CANNED_SEARCH_RESPONSE};
pub use spy::{CallRecord, CallTracker, Spy, TrackedCall};
