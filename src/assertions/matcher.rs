// Matcher factories are usually passed straight into `assert_that!`
#![allow(clippy::must_use_candidate)]

//! Matchers and the [`assert_that!`](crate::assert_that) macro.
//!
//! - [`Matcher`] trait for custom matchers
//! - Built-in matchers: [`eq`], [`one_of`], [`contains_str`], [`contains_any`],
//!   [`starts_with`]
//! - Combinators: [`any_of`], [`not`]
//!
//! ```rust
//! use idiomkit::assertions::matcher::{eq, not, Matcher};
//!
//! assert!(eq(42).matches(&42));
//! assert!(not(eq(0)).matches(&1));
//! ```

use std::fmt::Debug;

/// A predicate that can explain itself.
///
/// ```rust
/// use idiomkit::assertions::matcher::Matcher;
///
/// struct Shouting;
///
/// impl Matcher<String> for Shouting {
///     fn matches(&self, value: &String) -> bool {
///         value.chars().all(|c| !c.is_lowercase())
///     }
///
///     fn describe(&self) -> String {
///         "is shouted".to_string()
///     }
///
///     fn describe_mismatch(&self, value: &String) -> String {
///         format!("{value:?} is not shouted")
///     }
/// }
///
/// assert!(Shouting.matches(&"IT'S POPPY".to_string()));
/// ```
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

/// Runs `matcher` against `value`, returning `(describe_mismatch, describe)`
/// on failure. Binding `T` through a generic function lets `assert_that!`
/// pick the `Matcher<T>` impl from the value's own type.
#[doc(hidden)]
pub fn __check_match<T: ?Sized, M: Matcher<T> + ?Sized>(
    matcher: &M,
    value: &T,
) -> Option<(String, String)> {
    if matcher.matches(value) {
        None
    } else {
        Some((matcher.describe_mismatch(value), matcher.describe()))
    }
}

/// Assert that a value matches a matcher.
///
/// # Panics
///
/// Panics with the matcher's description if the value doesn't match.
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {{
        let value = &$value;
        let matcher = &$matcher;
        if let ::std::option::Option::Some((mismatch, expected)) =
            $crate::assertions::matcher::__check_match(matcher, value)
        {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {:?}",
                mismatch,
                expected,
                value
            );
        }
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let value = &$value;
        let matcher = &$matcher;
        if let ::std::option::Option::Some((mismatch, expected)) =
            $crate::assertions::matcher::__check_match(matcher, value)
        {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {:?}\n  message: {}",
                mismatch,
                expected,
                value,
                format_args!($($arg)+)
            );
        }
    }};
}

/// Equality.
pub fn eq<T: PartialEq + Debug>(expected: T) -> EqMatcher<T> {
    EqMatcher { expected }
}

/// Matcher for equality.
pub struct EqMatcher<T> {
    expected: T,
}

impl<T: PartialEq + Debug> Matcher<T> for EqMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        value == &self.expected
    }

    fn describe(&self) -> String {
        format!("equals {:?}", self.expected)
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{:?} does not equal {:?}", value, self.expected)
    }
}

/// Equal to one of several allowed strings.
///
/// ```rust
/// use idiomkit::assertions::matcher::{one_of, Matcher};
///
/// let m = one_of(["Taylor Swift", "Kanye West"]);
/// assert!(m.matches("Kanye West"));
/// assert!(!m.matches("Beyonce"));
/// ```
pub fn one_of<I, S>(allowed: I) -> OneOfMatcher
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OneOfMatcher {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

/// Matcher for membership in a set of strings.
pub struct OneOfMatcher {
    allowed: Vec<String>,
}

impl Matcher<str> for OneOfMatcher {
    fn matches(&self, value: &str) -> bool {
        self.allowed.iter().any(|a| a == value)
    }

    fn describe(&self) -> String {
        format!("one of {:?}", self.allowed)
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{:?} is not one of {:?}", value, self.allowed)
    }
}

impl Matcher<String> for OneOfMatcher {
    fn matches(&self, value: &String) -> bool {
        Matcher::<str>::matches(self, value.as_str())
    }

    fn describe(&self) -> String {
        Matcher::<str>::describe(self)
    }

    fn describe_mismatch(&self, value: &String) -> String {
        Matcher::<str>::describe_mismatch(self, value.as_str())
    }
}

impl<'a> Matcher<&'a str> for OneOfMatcher {
    fn matches(&self, value: &&'a str) -> bool {
        Matcher::<str>::matches(self, value)
    }

    fn describe(&self) -> String {
        Matcher::<str>::describe(self)
    }

    fn describe_mismatch(&self, value: &&'a str) -> String {
        Matcher::<str>::describe_mismatch(self, value)
    }
}

/// Contains a substring.
pub fn contains_str(substring: &str) -> ContainsStrMatcher {
    ContainsStrMatcher {
        substring: substring.to_string(),
    }
}

/// Matcher for string contains.
pub struct ContainsStrMatcher {
    substring: String,
}

impl Matcher<String> for ContainsStrMatcher {
    fn matches(&self, value: &String) -> bool {
        value.contains(&self.substring)
    }

    fn describe(&self) -> String {
        format!("contains {:?}", self.substring)
    }

    fn describe_mismatch(&self, value: &String) -> String {
        format!("{:?} does not contain {:?}", value, self.substring)
    }
}

/// Contains at least one of several substrings.
///
/// ```rust
/// use idiomkit::assertions::matcher::{contains_any, Matcher};
///
/// let m = contains_any(["Taylor Swift", "Kanye West"]);
/// assert!(m.matches(&"Kanye West says \"hi\"".to_string()));
/// ```
pub fn contains_any<I, S>(substrings: I) -> ContainsAnyMatcher
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ContainsAnyMatcher {
        substrings: substrings.into_iter().map(Into::into).collect(),
    }
}

/// Matcher for containing any of several substrings.
pub struct ContainsAnyMatcher {
    substrings: Vec<String>,
}

impl Matcher<String> for ContainsAnyMatcher {
    fn matches(&self, value: &String) -> bool {
        self.substrings.iter().any(|s| value.contains(s.as_str()))
    }

    fn describe(&self) -> String {
        format!("contains any of {:?}", self.substrings)
    }

    fn describe_mismatch(&self, value: &String) -> String {
        format!("{:?} contains none of {:?}", value, self.substrings)
    }
}

/// Starts with a prefix.
pub fn starts_with(prefix: &str) -> StartsWithMatcher {
    StartsWithMatcher {
        prefix: prefix.to_string(),
    }
}

/// Matcher for string starts-with.
pub struct StartsWithMatcher {
    prefix: String,
}

impl Matcher<String> for StartsWithMatcher {
    fn matches(&self, value: &String) -> bool {
        value.starts_with(&self.prefix)
    }

    fn describe(&self) -> String {
        format!("starts with {:?}", self.prefix)
    }

    fn describe_mismatch(&self, value: &String) -> String {
        format!("{:?} does not start with {:?}", value, self.prefix)
    }
}

/// Matches if any inner matcher does.
pub fn any_of<T, M>(matchers: Vec<M>) -> AnyOfMatcher<T>
where
    T: ?Sized,
    M: Matcher<T> + 'static,
{
    AnyOfMatcher {
        matchers: matchers
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Matcher<T>>)
            .collect(),
    }
}

/// Matcher combining alternatives.
pub struct AnyOfMatcher<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> Matcher<T> for AnyOfMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        self.matchers.iter().any(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("any of ({})", parts.join(" or "))
    }

    fn describe_mismatch(&self, value: &T) -> String {
        let parts: Vec<String> = self
            .matchers
            .iter()
            .map(|m| m.describe_mismatch(value))
            .collect();
        format!("none matched: {}", parts.join("; "))
    }
}

/// Negation.
pub fn not<T, M>(matcher: M) -> NotMatcher<T>
where
    T: ?Sized,
    M: Matcher<T> + 'static,
{
    NotMatcher {
        inner: Box::new(matcher),
    }
}

/// Matcher inverting another.
pub struct NotMatcher<T: ?Sized> {
    inner: Box<dyn Matcher<T>>,
}

impl<T: ?Sized> Matcher<T> for NotMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }

    fn describe_mismatch(&self, _value: &T) -> String {
        format!("matched {}", self.inner.describe())
    }
}
