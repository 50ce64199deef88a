//! The announcer with a shared, late-read field.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Announce, AnnouncementHandle, AnnouncementSink, CompletionSignal, Delivery};
use crate::config::AnnouncerConfig;
use crate::runtime::Spawner;

/// Announces whoever holds the field when the deferred task runs.
///
/// `announce()` captures a reference to the field, not its value. The task
/// reads it at an unspecified later time, so the emitted name is the last
/// write before *execution*, not before *scheduling*.
pub struct SharedAnnouncer<S> {
    announcer: Arc<RwLock<String>>,
    catchphrase: Arc<str>,
    spawner: S,
    signal: Arc<CompletionSignal>,
    sink: Arc<dyn AnnouncementSink>,
    scheduled: AtomicUsize,
}

impl<S: Spawner> SharedAnnouncer<S> {
    /// Creates an announcer starting from `config.announcer`.
    pub fn new(
        spawner: S,
        signal: Arc<CompletionSignal>,
        sink: Arc<dyn AnnouncementSink>,
        config: &AnnouncerConfig,
    ) -> Self {
        Self {
            announcer: Arc::new(RwLock::new(config.announcer.clone())),
            catchphrase: Arc::from(config.catchphrase.as_str()),
            spawner,
            signal,
            sink,
            scheduled: AtomicUsize::new(0),
        }
    }

    /// Overwrite the shared field.
    pub fn set_announcer(&self, name: impl Into<String>) {
        *self.announcer.write() = name.into();
    }

    /// Read the shared field.
    #[must_use]
    pub fn announcer(&self) -> String {
        self.announcer.read().clone()
    }

    /// Schedule a deferred read of the field.
    ///
    /// Returns immediately. The task reads the field when it runs, emits
    /// `<announcer> says "<catchphrase>"`, then signals completion.
    pub fn announce(&self) -> AnnouncementHandle {
        let sequence = self.scheduled.fetch_add(1, Ordering::SeqCst);
        let handle = AnnouncementHandle::scheduled(sequence);
        let field = Arc::clone(&self.announcer);
        let delivery = Delivery {
            handle: handle.clone(),
            catchphrase: Arc::clone(&self.catchphrase),
            sink: Arc::clone(&self.sink),
            signal: Arc::clone(&self.signal),
        };

        tracing::debug!(sequence, "announcement scheduled (shared field)");
        self.spawner
            .spawn_named(&format!("announce-{sequence}"), async move {
                delivery.run(move || field.read().clone());
            });
        handle
    }

    /// Number of announcements scheduled so far.
    #[must_use]
    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::SeqCst)
    }

    /// The completion signal shared with the caller.
    #[must_use]
    pub fn signal(&self) -> &Arc<CompletionSignal> {
        &self.signal
    }

    /// The execution context.
    #[must_use]
    pub fn spawner(&self) -> &S {
        &self.spawner
    }
}

impl<S: Spawner> Announce for SharedAnnouncer<S> {
    fn set_announcer(&mut self, name: &str) {
        SharedAnnouncer::set_announcer(self, name);
    }

    fn announcer(&self) -> String {
        SharedAnnouncer::announcer(self)
    }

    fn announce(&self) -> AnnouncementHandle {
        SharedAnnouncer::announce(self)
    }

    fn settle(&self) -> usize {
        self.spawner.settle()
    }

    fn completion(&self) -> &CompletionSignal {
        &self.signal
    }
}

impl<S> fmt::Debug for SharedAnnouncer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedAnnouncer")
            .field("announcer", &*self.announcer.read())
            .field("scheduled", &self.scheduled.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcer::{AnnouncementState, RecordingSink};
    use crate::executor::SteppedExecutor;

    fn fixture() -> (SteppedExecutor, RecordingSink, SharedAnnouncer<SteppedExecutor>) {
        let executor = SteppedExecutor::new();
        let sink = RecordingSink::new();
        let announcer = SharedAnnouncer::new(
            executor.clone(),
            Arc::new(CompletionSignal::new()),
            Arc::new(sink.clone()),
            &AnnouncerConfig::default(),
        );
        (executor, sink, announcer)
    }

    #[test]
    fn test_announce_does_not_run_inline() {
        let (executor, sink, announcer) = fixture();

        let handle = announcer.announce();

        assert_eq!(handle.state(), AnnouncementState::Scheduled);
        assert!(sink.is_empty());
        assert_eq!(announcer.signal().signaled_total(), 0);
        assert!(executor.task_by_name("announce-0").is_some());
    }

    #[test]
    fn test_beyonce() {
        let (executor, sink, announcer) = fixture();

        announcer.set_announcer("Beyonce");
        let handle = announcer.announce();
        executor.run_until_stalled();
        announcer.signal().wait();

        assert!(handle.is_signaled());
        assert!(sink.last().unwrap().contains("Beyonce"));
    }

    #[test]
    fn test_write_after_schedule_is_observed() {
        let (executor, sink, announcer) = fixture();

        announcer.set_announcer("Taylor Swift");
        let handle = announcer.announce();
        announcer.set_announcer("Kanye West");
        executor.run_until_stalled();
        announcer.signal().wait();

        assert_eq!(
            handle.line().as_deref(),
            Some("Kanye West says \"Your ten year old memes are lame.\"")
        );
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_write_after_execution_is_not_observed() {
        let (executor, _sink, announcer) = fixture();

        announcer.set_announcer("Taylor Swift");
        let handle = announcer.announce();
        executor.run_until_stalled();
        announcer.set_announcer("Kanye West");
        announcer.signal().wait();

        assert!(handle.line().unwrap().starts_with("Taylor Swift"));
    }

    #[test]
    fn test_zero_announcements_zero_signals() {
        let (executor, sink, announcer) = fixture();

        assert_eq!(executor.run_until_stalled(), 0);
        assert_eq!(announcer.scheduled(), 0);
        assert!(!announcer.signal().try_wait());
        assert_eq!(announcer.signal().signaled_total(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_one_signal_per_announcement() {
        let (executor, _sink, announcer) = fixture();

        for _ in 0..3 {
            announcer.announce();
        }
        executor.run_until_stalled();

        assert_eq!(announcer.scheduled(), 3);
        assert_eq!(announcer.signal().signaled_total(), 3);
        assert_eq!(announcer.signal().available(), 3);
    }

    #[test]
    fn test_starts_from_configured_announcer() {
        let announcer = SharedAnnouncer::new(
            SteppedExecutor::new(),
            Arc::new(CompletionSignal::new()),
            Arc::new(RecordingSink::new()),
            &AnnouncerConfig::new().announcer("Beyonce"),
        );

        assert_eq!(announcer.announcer(), "Beyonce");
        assert!(format!("{announcer:?}").contains("Beyonce"));
    }
}
