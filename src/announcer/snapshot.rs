//! The corrected announcer: values travel with the task.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Announce, AnnouncementHandle, AnnouncementSink, CompletionSignal, Delivery};
use crate::config::AnnouncerConfig;
use crate::runtime::Spawner;

/// Announces the value current at scheduling time.
///
/// The field is plain owned state. `announce()` clones it and moves the clone
/// into the task, so no later write can be observed.
pub struct SnapshotAnnouncer<S> {
    announcer: String,
    catchphrase: Arc<str>,
    spawner: S,
    signal: Arc<CompletionSignal>,
    sink: Arc<dyn AnnouncementSink>,
    scheduled: AtomicUsize,
}

impl<S: Spawner> SnapshotAnnouncer<S> {
    /// Creates an announcer starting from `config.announcer`.
    pub fn new(
        spawner: S,
        signal: Arc<CompletionSignal>,
        sink: Arc<dyn AnnouncementSink>,
        config: &AnnouncerConfig,
    ) -> Self {
        Self {
            announcer: config.announcer.clone(),
            catchphrase: Arc::from(config.catchphrase.as_str()),
            spawner,
            signal,
            sink,
            scheduled: AtomicUsize::new(0),
        }
    }

    /// Replace the announcer for future announcements.
    pub fn set_announcer(&mut self, name: impl Into<String>) {
        self.announcer = name.into();
    }

    /// The current announcer.
    #[must_use]
    pub fn announcer(&self) -> &str {
        &self.announcer
    }

    /// Schedule an announcement of the current value.
    pub fn announce(&self) -> AnnouncementHandle {
        self.announce_as(self.announcer.clone())
    }

    /// Schedule an announcement of an explicit value.
    pub fn announce_as(&self, name: impl Into<String>) -> AnnouncementHandle {
        let name = name.into();
        let sequence = self.scheduled.fetch_add(1, Ordering::SeqCst);
        let handle = AnnouncementHandle::scheduled(sequence);
        let delivery = Delivery {
            handle: handle.clone(),
            catchphrase: Arc::clone(&self.catchphrase),
            sink: Arc::clone(&self.sink),
            signal: Arc::clone(&self.signal),
        };

        tracing::debug!(sequence, announcer = %name, "announcement scheduled (snapshot)");
        self.spawner
            .spawn_named(&format!("announce-{sequence}"), async move {
                delivery.run(move || name);
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
}

impl<S: Spawner> Announce for SnapshotAnnouncer<S> {
    fn set_announcer(&mut self, name: &str) {
        SnapshotAnnouncer::set_announcer(self, name);
    }

    fn announcer(&self) -> String {
        self.announcer.clone()
    }

    fn announce(&self) -> AnnouncementHandle {
        SnapshotAnnouncer::announce(self)
    }

    fn settle(&self) -> usize {
        self.spawner.settle()
    }

    fn completion(&self) -> &CompletionSignal {
        &self.signal
    }
}

impl<S> fmt::Debug for SnapshotAnnouncer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotAnnouncer")
            .field("announcer", &self.announcer)
            .field("scheduled", &self.scheduled.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcer::RecordingSink;
    use crate::executor::SteppedExecutor;

    fn fixture() -> (SteppedExecutor, RecordingSink, SnapshotAnnouncer<SteppedExecutor>) {
        let executor = SteppedExecutor::new();
        let sink = RecordingSink::new();
        let announcer = SnapshotAnnouncer::new(
            executor.clone(),
            Arc::new(CompletionSignal::new()),
            Arc::new(sink.clone()),
            &AnnouncerConfig::default(),
        );
        (executor, sink, announcer)
    }

    #[test]
    fn test_write_after_schedule_is_not_observed() {
        let (executor, sink, mut announcer) = fixture();

        announcer.set_announcer("Taylor Swift");
        let handle = announcer.announce();
        announcer.set_announcer("Kanye West");
        executor.run_until_stalled();
        announcer.signal().wait();

        assert!(handle.line().unwrap().starts_with("Taylor Swift"));
        assert_eq!(announcer.announcer(), "Kanye West");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_announce_as_explicit_value() {
        let (executor, sink, announcer) = fixture();

        announcer.announce_as("Beyonce");
        announcer.announce_as("Poppy");
        executor.run_until_stalled();

        let lines = sink.lines();
        assert!(lines[0].starts_with("Beyonce"));
        assert!(lines[1].starts_with("Poppy"));
        assert_eq!(announcer.scheduled(), 2);
        assert_eq!(announcer.signal().signaled_total(), 2);
    }

    #[test]
    fn test_lifo_changes_order_not_content() {
        let executor = SteppedExecutor::with_policy(crate::executor::SchedulingPolicy::Lifo);
        let sink = RecordingSink::new();
        let announcer = SnapshotAnnouncer::new(
            executor.clone(),
            Arc::new(CompletionSignal::new()),
            Arc::new(sink.clone()),
            &AnnouncerConfig::new().catchphrase("hi"),
        );

        announcer.announce_as("first");
        announcer.announce_as("second");
        executor.run_until_stalled();

        assert_eq!(
            sink.lines(),
            vec![
                "second says \"hi\"".to_string(),
                "first says \"hi\"".to_string()
            ]
        );
    }
}
