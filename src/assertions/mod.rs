//! Assertions for outcomes that are allowed to vary.
//!
//! A racy scenario has more than one correct answer. Asserting a single value
//! makes the test flaky; asserting membership in the set of valid answers
//! does not.
//!
//! ```rust
//! use idiomkit::assert_that;
//! use idiomkit::assertions::matcher::{contains_any, one_of};
//!
//! let observed = "Kanye West".to_string();
//! assert_that!(observed, one_of(["Taylor Swift", "Kanye West"]));
//!
//! let line = "Taylor Swift says \"hi\"".to_string();
//! assert_that!(line, contains_any(["Taylor Swift", "Kanye West"]));
//! ```

pub mod matcher;
