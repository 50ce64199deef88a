//! Scripted interleavings of caller writes and deferred announcements.
//!
//! A [`Scenario`] is a list of [`Step`]s. A [`ScenarioDriver`] plays it
//! against any [`Announce`] implementation and reports what the sink saw.
//!
//! The driver holds the caller to one rule: every announcement must be
//! awaited before output is read. Breaking it yields
//! [`Error::UnawaitedAnnouncements`] instead of a flaky observation.
//!
//! ```rust
//! use std::sync::Arc;
//! use idiomkit::announcer::{CompletionSignal, RecordingSink, SharedAnnouncer};
//! use idiomkit::config::AnnouncerConfig;
//! use idiomkit::executor::SteppedExecutor;
//! use idiomkit::scenario::{canonical, ScenarioDriver};
//!
//! let config = AnnouncerConfig::default();
//! let sink = RecordingSink::new();
//! let announcer = SharedAnnouncer::new(
//!     SteppedExecutor::new(),
//!     Arc::new(CompletionSignal::new()),
//!     Arc::new(sink.clone()),
//!     &config,
//! );
//!
//! let mut driver = ScenarioDriver::new(announcer, sink, &config);
//! let report = driver.run(&canonical::beyonce()).unwrap();
//! assert!(report.last_line().unwrap().contains("Beyonce"));
//! ```

pub mod canonical;

use std::time::Duration;

use crate::announcer::{Announce, AnnouncementHandle, RecordingSink};
use crate::config::AnnouncerConfig;
use crate::error::{Error, Result};

/// One caller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Write the announcer field.
    SetAnnouncer(String),
    /// Schedule an announcement.
    Announce,
    /// Let a cooperative context run everything already scheduled.
    RunPending,
    /// Block on the completion signal for one announcement.
    Wait,
    /// Read the output so far.
    Observe,
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    steps: Vec<Step>,
}

impl Scenario {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a write of the announcer field.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::SetAnnouncer(name.into()));
        self
    }

    /// Append an announcement.
    #[must_use]
    pub fn announce(mut self) -> Self {
        self.steps.push(Step::Announce);
        self
    }

    /// Append a hand-off to the execution context.
    #[must_use]
    pub fn run_pending(mut self) -> Self {
        self.steps.push(Step::RunPending);
        self
    }

    /// Append a wait on the completion signal.
    #[must_use]
    pub fn wait(mut self) -> Self {
        self.steps.push(Step::Wait);
        self
    }

    /// Append an observation of the output.
    #[must_use]
    pub fn observe(mut self) -> Self {
        self.steps.push(Step::Observe);
        self
    }

    /// Append every step of `other`.
    #[must_use]
    pub fn then(mut self, other: Scenario) -> Self {
        self.steps.extend(other.steps);
        self
    }

    /// The steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// What a scenario run produced.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Lines the sink saw during this run, oldest first.
    pub lines: Vec<String>,
    /// One handle per announcement, in scheduling order.
    pub announcements: Vec<AnnouncementHandle>,
    /// Lines captured at each `Observe` step.
    pub observations: Vec<Vec<String>>,
    /// Total signals raised during the run.
    pub signals: usize,
}

impl ScenarioReport {
    /// The most recent line.
    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// The announcer named by each line (the text before ` says `).
    #[must_use]
    pub fn announcers(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|line| line.split(" says ").next().unwrap_or(line))
            .collect()
    }
}

/// Plays scenarios against an announcer.
pub struct ScenarioDriver<A> {
    announcer: A,
    output: RecordingSink,
    timeout: Duration,
    announcements: Vec<AnnouncementHandle>,
    unawaited: usize,
}

impl<A: Announce> ScenarioDriver<A> {
    /// `output` must be the sink the announcer emits into.
    pub fn new(announcer: A, output: RecordingSink, config: &AnnouncerConfig) -> Self {
        Self {
            announcer,
            output,
            timeout: config.signal_timeout,
            announcements: Vec::new(),
            unawaited: 0,
        }
    }

    /// Run every step, then observe the final output.
    ///
    /// # Errors
    ///
    /// - [`Error::UnawaitedAnnouncements`] if output is observed before every
    ///   announcement was awaited
    /// - [`Error::Timeout`] if a wait exceeds the configured signal timeout
    pub fn run(&mut self, scenario: &Scenario) -> Result<ScenarioReport> {
        let signals_before = self.announcer.completion().signaled_total();
        let first_announcement = self.announcements.len();
        let first_line = self.output.len();
        let mut observations = Vec::new();

        for step in scenario.steps() {
            tracing::trace!(?step, "scenario step");
            match step {
                Step::SetAnnouncer(name) => self.announcer.set_announcer(name),
                Step::Announce => {
                    let handle = self.announcer.announce();
                    self.announcements.push(handle);
                    self.unawaited += 1;
                }
                Step::RunPending => {
                    self.announcer.settle();
                }
                Step::Wait => self.wait()?,
                Step::Observe => observations.push(self.observe(first_line)?),
            }
        }

        let lines = self.observe(first_line)?;
        Ok(ScenarioReport {
            lines,
            announcements: self.announcements[first_announcement..].to_vec(),
            observations,
            signals: self.announcer.completion().signaled_total() - signals_before,
        })
    }

    fn wait(&mut self) -> Result<()> {
        self.announcer.settle();
        self.announcer.completion().wait_timeout(self.timeout)?;
        self.unawaited = self.unawaited.saturating_sub(1);
        Ok(())
    }

    /// Lines emitted since `first_line`, i.e. during the current run.
    fn observe(&self, first_line: usize) -> Result<Vec<String>> {
        if self.unawaited > 0 {
            return Err(Error::UnawaitedAnnouncements(self.unawaited));
        }
        Ok(self.output.lines().into_iter().skip(first_line).collect())
    }

    /// The announcer being driven.
    #[must_use]
    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    /// Announcements scheduled but not yet awaited.
    #[must_use]
    pub fn unawaited(&self) -> usize {
        self.unawaited
    }
}
