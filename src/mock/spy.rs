// Spy accessors are often called for their side effects in tests
#![allow(clippy::must_use_candidate)]

//! Call recording.
//!
//! ```rust
//! use idiomkit::mock::Spy;
//!
//! let spy = Spy::new(|name: String| format!("It's {name}"));
//! assert_eq!(spy.call("Poppy".to_string()), "It's Poppy");
//! assert_eq!(spy.call_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Arguments of one tracked call.
#[derive(Debug, Clone)]
pub struct TrackedCall<A> {
    /// The arguments passed to the call.
    pub args: A,
    /// When the call was made (relative to tracker creation).
    pub timestamp: Duration,
}

/// Records calls without wrapping a function.
///
/// Clones share the same history, so a double can hand a clone to the test
/// and keep one for itself.
pub struct CallTracker<A> {
    calls: Arc<Mutex<Vec<TrackedCall<A>>>>,
    created_at: Instant,
}

impl<A: Clone> CallTracker<A> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            created_at: Instant::now(),
        }
    }

    /// Record a call.
    pub fn track(&self, args: A) {
        self.calls.lock().push(TrackedCall {
            args,
            timestamp: self.created_at.elapsed(),
        });
    }

    /// Every tracked call, oldest first.
    pub fn calls(&self) -> Vec<TrackedCall<A>> {
        self.calls.lock().clone()
    }

    /// Just the arguments, oldest first.
    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|c| c.args.clone()).collect()
    }

    /// Number of tracked calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if anything was tracked.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if any call had these arguments.
    pub fn was_called_with(&self, expected: &A) -> bool
    where
        A: PartialEq,
    {
        self.calls.lock().iter().any(|c| &c.args == expected)
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<TrackedCall<A>> {
        self.calls.lock().last().cloned()
    }

    /// Forget all calls.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl<A: Clone> Default for CallTracker<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for CallTracker<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            created_at: self.created_at,
        }
    }
}

impl<A: Debug> Debug for CallTracker<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallTracker")
            .field("calls", &*self.calls.lock())
            .finish()
    }
}

/// Arguments and result of one spied call.
#[derive(Debug, Clone)]
pub struct CallRecord<A, R> {
    /// The arguments passed to the call.
    pub args: A,
    /// The value returned.
    pub result: R,
}

/// Wraps a function and records every call through it.
pub struct Spy<F, A, R> {
    inner: F,
    calls: Arc<Mutex<Vec<CallRecord<A, R>>>>,
}

impl<F, A, R> Spy<F, A, R>
where
    F: Fn(A) -> R,
    A: Clone,
    R: Clone,
{
    /// Wrap `func`.
    pub fn new(func: F) -> Self {
        Self {
            inner: func,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Call through the spy.
    pub fn call(&self, args: A) -> R {
        let result = (self.inner)(args.clone());
        self.calls.lock().push(CallRecord {
            args,
            result: result.clone(),
        });
        result
    }

    /// Every recorded call.
    pub fn calls(&self) -> Vec<CallRecord<A, R>> {
        self.calls.lock().clone()
    }

    /// Number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The Nth call (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<CallRecord<A, R>> {
        self.calls.lock().get(n).cloned()
    }
}

impl<F, A: Debug, R: Debug> Debug for Spy<F, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spy")
            .field("calls", &*self.calls.lock())
            .finish_non_exhaustive()
    }
}
