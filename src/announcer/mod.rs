//! Announcers that defer their work to a background context.
//!
//! [`SharedAnnouncer`] is the dangerous version. Its deferred task reads the
//! announcer field whenever the task happens to run, so a write made after
//! `announce()` returned can still show up in the output. Nothing fails. The
//! output is simply not what the call site suggests.
//!
//! [`SnapshotAnnouncer`] copies the value into the task when it is scheduled,
//! so later writes cannot leak in.
//!
//! ```rust
//! use std::sync::Arc;
//! use idiomkit::announcer::{CompletionSignal, RecordingSink, SharedAnnouncer};
//! use idiomkit::config::AnnouncerConfig;
//! use idiomkit::executor::SteppedExecutor;
//!
//! let executor = SteppedExecutor::new();
//! let signal = Arc::new(CompletionSignal::new());
//! let sink = RecordingSink::new();
//! let announcer = SharedAnnouncer::new(
//!     executor.clone(),
//!     Arc::clone(&signal),
//!     Arc::new(sink.clone()),
//!     &AnnouncerConfig::default(),
//! );
//!
//! announcer.set_announcer("Taylor Swift");
//! announcer.announce();
//! announcer.set_announcer("Kanye West");
//!
//! executor.run_until_stalled();
//! signal.wait();
//! assert_eq!(
//!     sink.last().as_deref(),
//!     Some("Kanye West says \"Your ten year old memes are lame.\"")
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

mod shared;
mod signal;
mod sink;
mod snapshot;

pub use shared::SharedAnnouncer;
pub use signal::CompletionSignal;
pub use sink::{AnnouncementSink, RecordingSink, StdoutSink, TeeSink, TracingSink};
pub use snapshot::SnapshotAnnouncer;

/// The line an announcement emits.
#[must_use]
pub fn format_announcement(announcer: &str, catchphrase: &str) -> String {
    format!("{announcer} says \"{catchphrase}\"")
}

/// Common surface of both announcers, so one driver can run either.
pub trait Announce {
    /// Replace the announcer value.
    fn set_announcer(&mut self, name: &str);

    /// The current announcer value.
    fn announcer(&self) -> String;

    /// Schedule one announcement.
    fn announce(&self) -> AnnouncementHandle;

    /// Let the execution context run already scheduled work.
    fn settle(&self) -> usize;

    /// The signal raised by each finished announcement.
    fn completion(&self) -> &CompletionSignal;
}

/// Lifecycle of a single announcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnouncementState {
    /// Handed to the execution context.
    Scheduled,
    /// The deferred task has started and is reading the announcer.
    Running,
    /// The line was emitted and the completion signal raised.
    Signaled,
}

impl fmt::Display for AnnouncementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnouncementState::Scheduled => write!(f, "Scheduled"),
            AnnouncementState::Running => write!(f, "Running"),
            AnnouncementState::Signaled => write!(f, "Signaled"),
        }
    }
}

#[derive(Debug)]
struct AnnouncementRecord {
    state: AnnouncementState,
    line: Option<String>,
}

/// Observes one scheduled announcement.
#[derive(Clone)]
pub struct AnnouncementHandle {
    sequence: usize,
    record: Arc<Mutex<AnnouncementRecord>>,
}

impl AnnouncementHandle {
    fn scheduled(sequence: usize) -> Self {
        Self {
            sequence,
            record: Arc::new(Mutex::new(AnnouncementRecord {
                state: AnnouncementState::Scheduled,
                line: None,
            })),
        }
    }

    /// Position of this announcement among those scheduled by its announcer.
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnnouncementState {
        self.record.lock().state
    }

    /// The emitted line, once signaled.
    #[must_use]
    pub fn line(&self) -> Option<String> {
        self.record.lock().line.clone()
    }

    /// Returns true once the line was emitted and signaled.
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.state() == AnnouncementState::Signaled
    }
}

impl fmt::Debug for AnnouncementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record.lock();
        f.debug_struct("AnnouncementHandle")
            .field("sequence", &self.sequence)
            .field("state", &record.state)
            .field("line", &record.line)
            .finish()
    }
}

/// Everything a deferred task needs to finish an announcement.
struct Delivery {
    handle: AnnouncementHandle,
    catchphrase: Arc<str>,
    sink: Arc<dyn AnnouncementSink>,
    signal: Arc<CompletionSignal>,
}

impl Delivery {
    /// Runs inside the deferred task. `read` is called after the task is
    /// marked running.
    fn run(self, read: impl FnOnce() -> String) {
        self.handle.record.lock().state = AnnouncementState::Running;
        tracing::debug!(sequence = self.handle.sequence, "announcement running");

        let announcer = read();
        let line = format_announcement(&announcer, &self.catchphrase);
        self.sink.emit(&line);

        {
            let mut record = self.handle.record.lock();
            record.line = Some(line);
            record.state = AnnouncementState::Signaled;
        }
        self.signal.signal();
        tracing::debug!(
            sequence = self.handle.sequence,
            announcer = %announcer,
            "announcement signaled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_announcement() {
        assert_eq!(
            format_announcement("Beyonce", "Your ten year old memes are lame."),
            "Beyonce says \"Your ten year old memes are lame.\""
        );
    }

    #[test]
    fn test_delivery_walks_lifecycle() {
        let handle = AnnouncementHandle::scheduled(3);
        let sink = RecordingSink::new();
        let signal = Arc::new(CompletionSignal::new());
        let observed = handle.clone();

        assert_eq!(handle.state(), AnnouncementState::Scheduled);

        Delivery {
            handle: handle.clone(),
            catchphrase: Arc::from("hi"),
            sink: Arc::new(sink.clone()),
            signal: Arc::clone(&signal),
        }
        .run(|| {
            assert_eq!(observed.state(), AnnouncementState::Running);
            "Beyonce".to_string()
        });

        assert!(handle.is_signaled());
        assert_eq!(handle.sequence(), 3);
        assert_eq!(handle.line().as_deref(), Some("Beyonce says \"hi\""));
        assert_eq!(sink.lines(), vec!["Beyonce says \"hi\"".to_string()]);
        assert_eq!(signal.signaled_total(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AnnouncementState::Scheduled.to_string(), "Scheduled");
        assert_eq!(AnnouncementState::Running.to_string(), "Running");
        assert_eq!(AnnouncementState::Signaled.to_string(), "Signaled");
    }
}
