//! A counting completion signal.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};

/// Lets a waiting thread find out that deferred work has finished.
///
/// A counting semaphore starting at zero: each [`signal`](Self::signal) adds
/// one permit, each successful wait takes one. Permits are never created any
/// other way, so a scenario that schedules nothing can never be woken.
///
/// ```rust
/// use idiomkit::announcer::CompletionSignal;
///
/// let signal = CompletionSignal::new();
/// assert!(!signal.try_wait());
///
/// signal.signal();
/// assert!(signal.try_wait());
/// assert_eq!(signal.signaled_total(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CompletionSignal {
    state: Mutex<SignalState>,
    cond: Condvar,
}

#[derive(Debug, Default)]
struct SignalState {
    available: usize,
    total: usize,
}

impl CompletionSignal {
    /// Creates a signal with no permits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one permit and wakes one waiter.
    pub fn signal(&self) {
        let mut state = self.state.lock();
        state.available += 1;
        state.total += 1;
        self.cond.notify_one();
    }

    /// Blocks until a permit is available, then takes it.
    pub fn wait(&self) {
        let mut state = self.state.lock();
        while state.available == 0 {
            self.cond.wait(&mut state);
        }
        state.available -= 1;
    }

    /// Like [`wait`](Self::wait), but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if no permit arrived in time.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.available == 0 {
            if self.cond.wait_until(&mut state, deadline).timed_out() && state.available == 0 {
                tracing::warn!(?timeout, "completion signal timed out");
                return Err(Error::Timeout(timeout));
            }
        }
        state.available -= 1;
        Ok(())
    }

    /// Takes a permit if one is available without blocking.
    pub fn try_wait(&self) -> bool {
        let mut state = self.state.lock();
        if state.available > 0 {
            state.available -= 1;
            true
        } else {
            false
        }
    }

    /// Permits raised but not yet taken.
    #[must_use]
    pub fn available(&self) -> usize {
        self.state.lock().available
    }

    /// Every signal ever raised on this instance.
    #[must_use]
    pub fn signaled_total(&self) -> usize {
        self.state.lock().total
    }
}
