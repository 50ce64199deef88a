//! Synchronous introducers.
//!
//! The same behavior written three ways: as a free function, as a method on a
//! stateless object, and as a method whose output depends on instance state.
//! [`SafeIntroducer`] shows the fix for the last one: an associated function
//! cannot see instance state at all.
//!
//! ```rust
//! use idiomkit::introducer::{who_is_it, LessSimpleIntroducer, SimpleIntroducer};
//!
//! assert_eq!(who_is_it("Poppy"), "It's Poppy");
//! assert_eq!(SimpleIntroducer.who_is_it("Poppy"), "It's Poppy");
//! assert_eq!(
//!     LessSimpleIntroducer::default().who_is_it("Poppy"),
//!     "Taylor Swift says \"It's Poppy\""
//! );
//! ```

use crate::config::DEFAULT_ANNOUNCER;
use crate::error::{Error, Result};

/// Introduces `name`.
#[must_use]
pub fn who_is_it(name: &str) -> String {
    format!("It's {name}")
}

/// Something that can introduce a name.
pub trait Introduce {
    /// Produce the introduction for `name`.
    fn introduce(&self, name: &str) -> String;
}

/// The free function wrapped in an object.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleIntroducer;

impl SimpleIntroducer {
    /// Introduces `name`.
    #[must_use]
    pub fn who_is_it(&self, name: &str) -> String {
        who_is_it(name)
    }
}

impl Introduce for SimpleIntroducer {
    fn introduce(&self, name: &str) -> String {
        self.who_is_it(name)
    }
}

/// An introducer whose output depends on mutable instance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessSimpleIntroducer {
    /// Who does the introducing.
    pub announcer: String,
}

impl LessSimpleIntroducer {
    /// Creates an introducer with the given announcer.
    #[must_use]
    pub fn new(announcer: impl Into<String>) -> Self {
        Self {
            announcer: announcer.into(),
        }
    }

    /// Introduces `name` on behalf of the announcer.
    #[must_use]
    pub fn who_is_it(&self, name: &str) -> String {
        format!("{} says \"{}\"", self.announcer, who_is_it(name))
    }
}

impl Default for LessSimpleIntroducer {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOUNCER)
    }
}

impl Introduce for LessSimpleIntroducer {
    fn introduce(&self, name: &str) -> String {
        self.who_is_it(name)
    }
}

/// Carries the same state as [`LessSimpleIntroducer`] but keeps it out of
/// reach of the introduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeIntroducer {
    /// Present on the instance, invisible to [`SafeIntroducer::who_is_it`].
    pub announcer: String,
}

impl SafeIntroducer {
    /// Introduces `name`. No `self`, so no instance state.
    #[must_use]
    pub fn who_is_it(name: &str) -> String {
        who_is_it(name)
    }
}

impl Default for SafeIntroducer {
    fn default() -> Self {
        Self {
            announcer: DEFAULT_ANNOUNCER.to_string(),
        }
    }
}

impl Introduce for SafeIntroducer {
    fn introduce(&self, name: &str) -> String {
        Self::who_is_it(name)
    }
}

/// Compare an introduction against the expected text.
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] describing both strings on mismatch.
pub fn verify_introduction(expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::assertion_failed(format!(
            "expected {expected:?}, got {actual:?}"
        )))
    }
}
