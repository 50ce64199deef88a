//! Tokio-backed background pool.
//!
//! The pool owns a multi-threaded tokio runtime. Work submitted through
//! [`Spawner::spawn`] starts on a worker thread at whatever moment the tokio
//! scheduler picks, concurrently with the submitting thread.
//!
//! # Example
//!
//! ```rust
//! use idiomkit::config::AnnouncerConfig;
//! use idiomkit::runtime::tokio::BackgroundPool;
//! use idiomkit::runtime::Spawner;
//! use std::sync::mpsc;
//!
//! let pool = BackgroundPool::new(&AnnouncerConfig::default()).unwrap();
//! let (tx, rx) = mpsc::channel();
//! pool.spawn(async move {
//!     tx.send(42).unwrap();
//! });
//! assert_eq!(rx.recv().unwrap(), 42);
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::Instrument;

use super::Spawner;
use crate::config::AnnouncerConfig;
use crate::error::Result;

/// A pool of background worker threads.
pub struct BackgroundPool {
    runtime: ::tokio::runtime::Runtime,
    worker_threads: usize,
}

impl BackgroundPool {
    /// Build a pool sized and named from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for an invalid config and
    /// [`Error::Io`](crate::Error::Io) if the runtime cannot start its threads.
    pub fn new(config: &AnnouncerConfig) -> Result<Self> {
        config.validate()?;
        let runtime = ::tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name(config.thread_name.clone())
            .build()?;
        tracing::debug!(
            workers = config.worker_threads,
            thread_name = %config.thread_name,
            "background pool started"
        );
        Ok(Self {
            runtime,
            worker_threads: config.worker_threads,
        })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Stop the pool, waiting up to `timeout` for running work.
    pub fn shutdown(self, timeout: Duration) {
        self.runtime.shutdown_timeout(timeout);
        tracing::debug!("background pool stopped");
    }
}

impl Spawner for BackgroundPool {
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(self.runtime.spawn(future));
    }

    fn spawn_named<F>(&self, name: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let span = tracing::debug_span!("task", name = %name);
        self.spawn(future.instrument(span));
    }
}

impl fmt::Debug for BackgroundPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundPool")
            .field("worker_threads", &self.worker_threads)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;

    #[test]
    fn test_pool_runs_work_off_the_caller_thread() {
        let pool = BackgroundPool::new(&AnnouncerConfig::new().thread_name("pool-test")).unwrap();
        let (tx, rx) = mpsc::channel();

        pool.spawn(async move {
            let name = std::thread::current().name().map(str::to_string);
            tx.send(name).unwrap();
        });

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("pool-test"));
    }

    #[test]
    fn test_pool_named_spawn_runs() {
        let pool = Arc::new(BackgroundPool::new(&AnnouncerConfig::default()).unwrap());
        let (tx, rx) = mpsc::channel();

        pool.spawn_named("named", async move {
            tx.send(7).unwrap();
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 7);
        assert_eq!(pool.settle(), 0);
    }

    #[test]
    fn test_pool_rejects_invalid_config() {
        let err = BackgroundPool::new(&AnnouncerConfig::new().worker_threads(0)).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_pool_shutdown() {
        let pool = BackgroundPool::new(&AnnouncerConfig::new().worker_threads(1)).unwrap();
        assert_eq!(pool.worker_threads(), 1);
        pool.shutdown(Duration::from_secs(1));
    }
}
