//! Where announcement lines go.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receives one line per completed announcement.
pub trait AnnouncementSink: Send + Sync {
    /// Deliver a line.
    fn emit(&self, line: &str);
}

/// Keeps every line for later inspection.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// The most recent line.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.lines.lock().last().cloned()
    }

    /// Number of lines received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl AnnouncementSink for RecordingSink {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Logs lines at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnnouncementSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "idiomkit::announcement", "{line}");
    }
}

/// Prints lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl AnnouncementSink for StdoutSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Records each line and logs it.
#[derive(Debug, Clone, Default)]
pub struct TeeSink {
    recording: RecordingSink,
}

impl TeeSink {
    /// Tee into `recording`.
    #[must_use]
    pub fn new(recording: RecordingSink) -> Self {
        Self { recording }
    }

    /// The recording half.
    #[must_use]
    pub fn recording(&self) -> &RecordingSink {
        &self.recording
    }
}

impl AnnouncementSink for TeeSink {
    fn emit(&self, line: &str) {
        TracingSink.emit(line);
        self.recording.emit(line);
    }
}
