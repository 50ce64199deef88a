//! Task types for the stepped executor.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use parking_lot::Mutex;

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Where a task is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    /// Submitted, not yet polled to completion.
    Scheduled,
    /// Being polled right now.
    Running,
    /// Finished.
    Completed,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Scheduled => write!(f, "Scheduled"),
            TaskState::Running => write!(f, "Running"),
            TaskState::Completed => write!(f, "Completed"),
        }
    }
}

/// Order in which ready tasks are picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SchedulingPolicy {
    /// Oldest ready task first.
    #[default]
    Fifo,
    /// Newest ready task first.
    Lifo,
    /// Reproducible pseudo-random pick from the given seed.
    SeededRandom(u64),
}

/// Snapshot of a task for inspection.
#[derive(Clone, Debug)]
pub struct TaskInfo {
    /// The task's unique identifier.
    pub id: TaskId,
    /// Current state of the task.
    pub state: TaskState,
    /// Optional name for debugging.
    pub name: Option<String>,
    /// Number of times this task has been polled.
    pub poll_count: usize,
}

impl TaskInfo {
    pub(crate) fn new(id: TaskId, name: Option<String>) -> Self {
        Self {
            id,
            state: TaskState::Scheduled,
            name,
            poll_count: 0,
        }
    }
}

/// Handle to a task's eventual output.
pub struct TaskHandle<T> {
    /// The task's unique identifier.
    pub id: TaskId,
    result: Arc<Mutex<Option<T>>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(id: TaskId, result: Arc<Mutex<Option<T>>>) -> Self {
        Self { id, result }
    }

    /// Takes the output if the task has completed.
    ///
    /// Returns `None` before completion or once the output was taken.
    #[must_use]
    pub fn take(&self) -> Option<T> {
        self.result.lock().take()
    }

    /// Returns true if the task has completed and its output is still here.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.lock().is_some()
    }
}

impl<T> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            result: Arc::clone(&self.result),
        }
    }
}

impl<T> fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("is_complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Task {
    pub id: TaskId,
    pub future: BoxFuture<'static, ()>,
    pub poll_count: usize,
}

impl Task {
    /// Wraps `future` so its output lands in `result_slot`.
    pub fn new<F, T>(id: TaskId, future: F, result_slot: Arc<Mutex<Option<T>>>) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let wrapped = async move {
            let output = future.await;
            *result_slot.lock() = Some(output);
        };

        Self {
            id,
            future: Box::pin(wrapped),
            poll_count: 0,
        }
    }

    pub fn poll(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        self.poll_count += 1;
        self.future.as_mut().poll(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_unique_and_ordered() {
        let id1 = TaskId::new();
        let id2 = TaskId::new();

        assert_ne!(id1, id2);
        assert!(id1 < id2);
        assert_eq!(id1.to_string(), format!("Task({})", id1.as_u64()));
    }

    #[test]
    fn test_task_state_display() {
        assert_eq!(TaskState::Scheduled.to_string(), "Scheduled");
        assert_eq!(TaskState::Running.to_string(), "Running");
        assert_eq!(TaskState::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_task_info_starts_scheduled() {
        let info = TaskInfo::new(TaskId::new(), Some("announce-0".to_string()));

        assert_eq!(info.state, TaskState::Scheduled);
        assert_eq!(info.name.as_deref(), Some("announce-0"));
        assert_eq!(info.poll_count, 0);
    }

    #[test]
    fn test_task_stores_output_when_polled() {
        let slot = Arc::new(Mutex::new(None));
        let handle = TaskHandle::new(TaskId::new(), Arc::clone(&slot));
        let mut task = Task::new(handle.id, async { "Beyonce" }, slot);

        assert!(!handle.is_complete());

        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(task.poll(&mut cx).is_ready());

        assert_eq!(task.poll_count, 1);
        assert_eq!(handle.take(), Some("Beyonce"));
        assert!(handle.take().is_none());
    }

    #[test]
    fn test_default_policy_is_fifo() {
        assert_eq!(SchedulingPolicy::default(), SchedulingPolicy::Fifo);
    }
}
