//! Execution contexts for deferred work.
//!
//! An announcer never runs its work inline. It hands a future to a
//! [`Spawner`], and the spawner decides when that future runs.
//!
//! # Implementations
//!
//! - [`BackgroundPool`](crate::runtime::tokio::BackgroundPool) - a real
//!   multi-threaded pool (with the `tokio` feature)
//! - [`SteppedExecutor`](crate::executor::SteppedExecutor) - runs work only
//!   when stepped, for reproducible interleavings
//!
//! # Example
//!
//! ```rust
//! use idiomkit::executor::SteppedExecutor;
//! use idiomkit::runtime::Spawner;
//!
//! let executor = SteppedExecutor::new();
//! executor.spawn_named("hello", async { println!("hello") });
//!
//! assert_eq!(executor.pending_count(), 1);
//! assert_eq!(Spawner::settle(&executor), 1);
//! ```

use std::future::Future;
use std::sync::Arc;

/// Something that accepts deferred units of work.
///
/// Submission never blocks and never runs the work on the caller's stack.
pub trait Spawner: Send + Sync {
    /// Submit a unit of work.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static;

    /// Submit a unit of work with a name (for debugging).
    fn spawn_named<F>(&self, name: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _ = name;
        self.spawn(future);
    }

    /// Give a cooperative context the chance to run work that is already
    /// scheduled. Called by callers right before they block.
    ///
    /// Returns the number of units that ran. Contexts with their own threads
    /// return 0.
    fn settle(&self) -> usize {
        0
    }
}

impl<S: Spawner> Spawner for Arc<S> {
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        (**self).spawn(future);
    }

    fn spawn_named<F>(&self, name: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        (**self).spawn_named(name, future);
    }

    fn settle(&self) -> usize {
        (**self).settle()
    }
}

#[cfg(feature = "tokio")]
pub mod tokio;
