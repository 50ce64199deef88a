//! # idiomkit
//!
//! > Object-oriented design lessons, in Rust
//!
//! Small, tested examples of design idioms. The centerpiece is a shared-state
//! race: an announcer that defers reading a mutable field to a background
//! context, so the value it prints depends on when that context runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use idiomkit::prelude::*;
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
//! let report = driver.run(&canonical::taylor_then_kanye()).unwrap();
//! let announcers = report.announcers();
//! assert_that!(announcers[0], one_of(canonical::TAYLOR_THEN_KANYE_OUTCOMES));
//! ```
//!
//! ## Lessons
//!
//! - [`introducer`] - functions vs. objects, and state that leaks into output
//! - [`announcer`] - the deferred read race and its snapshot fix
//! - [`scenario`] - reproducible interleavings of writes and announcements
//! - [`tweets`] - composition and dependency injection
//! - [`mock`] - test doubles behind interfaces
//! - [`fixtures`] - fixtures composed from factory functions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod announcer;
pub mod assertions;
pub mod config;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod introducer;
pub mod mock;
pub mod runtime;
pub mod scenario;
pub mod tweets;

/// Prelude for convenient imports
///
/// ```rust
/// use idiomkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::announcer::{
        Announce, AnnouncementHandle, AnnouncementSink, AnnouncementState, CompletionSignal,
        RecordingSink, SharedAnnouncer, SnapshotAnnouncer, TeeSink, TracingSink,
    };
    pub use crate::assert_that;
    pub use crate::assertions::matcher::{contains_any, contains_str, eq, one_of, Matcher};
    pub use crate::config::AnnouncerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::executor::{SchedulingPolicy, SteppedExecutor};
    #[cfg(feature = "tokio")]
    pub use crate::runtime::tokio::BackgroundPool;
    pub use crate::runtime::Spawner;
    pub use crate::scenario::{canonical, Scenario, ScenarioDriver, ScenarioReport, Step};
}

// Re-exports
pub use error::{Error, Result};
