//! A manually stepped execution context.
//!
//! [`SteppedExecutor`] holds scheduled work until the caller steps it. That
//! turns "the scheduler decides when the deferred read happens" into
//! something a test can pin down and replay.
//!
//! # Example
//!
//! ```rust
//! use idiomkit::executor::{SteppedExecutor, TaskState};
//!
//! let executor = SteppedExecutor::new();
//! let handle = executor.spawn(async { 1 + 1 });
//!
//! assert_eq!(executor.task(handle.id).unwrap().state, TaskState::Scheduled);
//! executor.run_until_stalled();
//! assert_eq!(handle.take(), Some(2));
//! ```

mod stepped;
mod task;

pub use stepped::SteppedExecutor;
pub use task::{SchedulingPolicy, TaskHandle, TaskId, TaskInfo, TaskState};
