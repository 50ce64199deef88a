//! The [`SteppedExecutor`] implementation.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use parking_lot::Mutex;

use crate::executor::task::{SchedulingPolicy, Task, TaskHandle, TaskId, TaskInfo, TaskState};
use crate::runtime::Spawner;

/// An execution context that only runs work when told to.
///
/// Spawned tasks sit in a ready queue until [`step`] or [`run_until_stalled`]
/// polls them, so the caller decides exactly where in its own sequence the
/// deferred work happens.
///
/// # Example
///
/// ```rust
/// use idiomkit::executor::SteppedExecutor;
///
/// let executor = SteppedExecutor::new();
/// let handle = executor.spawn(async { 42 });
///
/// assert!(!handle.is_complete());
/// assert!(executor.step());
/// assert_eq!(handle.take(), Some(42));
/// assert!(!executor.step());
/// ```
///
/// [`step`]: SteppedExecutor::step
/// [`run_until_stalled`]: SteppedExecutor::run_until_stalled
#[derive(Clone)]
pub struct SteppedExecutor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    ready_queue: Mutex<VecDeque<Task>>,
    /// Tasks that returned `Pending` and have not been woken.
    waiting: Mutex<Vec<Task>>,
    task_info: Mutex<Vec<TaskInfo>>,
    policy: SchedulingPolicy,
    random_state: Mutex<u64>,
}

impl SteppedExecutor {
    /// Creates an executor with FIFO scheduling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(SchedulingPolicy::Fifo)
    }

    /// Creates an executor with the given scheduling policy.
    ///
    /// ```rust
    /// use idiomkit::executor::{SchedulingPolicy, SteppedExecutor};
    ///
    /// let executor = SteppedExecutor::with_policy(SchedulingPolicy::SeededRandom(42));
    /// assert_eq!(executor.policy(), SchedulingPolicy::SeededRandom(42));
    /// ```
    #[must_use]
    pub fn with_policy(policy: SchedulingPolicy) -> Self {
        let seed = match policy {
            // xorshift never leaves zero
            SchedulingPolicy::SeededRandom(s) => s.max(1),
            _ => 0,
        };
        Self {
            inner: Arc::new(ExecutorInner {
                ready_queue: Mutex::new(VecDeque::new()),
                waiting: Mutex::new(Vec::new()),
                task_info: Mutex::new(Vec::new()),
                policy,
                random_state: Mutex::new(seed),
            }),
        }
    }

    /// Returns the scheduling policy.
    #[must_use]
    pub fn policy(&self) -> SchedulingPolicy {
        self.inner.policy
    }

    /// Queues a future. It does not run until stepped.
    pub fn spawn<F, T>(&self, future: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.enqueue(None, future)
    }

    /// Queues a named future.
    pub fn spawn_named<F, T>(&self, name: &str, future: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.enqueue(Some(name.to_string()), future)
    }

    fn enqueue<F, T>(&self, name: Option<String>, future: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let id = TaskId::new();
        let result_slot = Arc::new(Mutex::new(None));
        let task = Task::new(id, future, Arc::clone(&result_slot));

        tracing::trace!(task = %id, name = ?name, "task queued");
        self.inner.task_info.lock().push(TaskInfo::new(id, name));
        self.inner.ready_queue.lock().push_back(task);

        TaskHandle::new(id, result_slot)
    }

    /// Number of tasks ready to run.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.ready_queue.lock().len()
    }

    /// Number of tasks parked until woken.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.inner.waiting.lock().len()
    }

    /// Ready plus parked tasks.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pending_count() + self.waiting_count()
    }

    /// Returns true if nothing is left to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Information about one task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<TaskInfo> {
        self.inner
            .task_info
            .lock()
            .iter()
            .find(|info| info.id == id)
            .cloned()
    }

    /// Finds a task by name.
    #[must_use]
    pub fn task_by_name(&self, name: &str) -> Option<TaskInfo> {
        self.inner
            .task_info
            .lock()
            .iter()
            .find(|info| info.name.as_deref() == Some(name))
            .cloned()
    }

    /// Information about every task ever spawned, in spawn order.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskInfo> {
        self.inner.task_info.lock().clone()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.inner
            .task_info
            .lock()
            .iter()
            .filter(|info| info.state == TaskState::Completed)
            .count()
    }

    /// Polls one task chosen by the scheduling policy.
    ///
    /// Returns `false` if nothing was ready.
    pub fn step(&self) -> bool {
        match self.next_task() {
            Some(task) => {
                self.poll_task(task);
                true
            }
            None => false,
        }
    }

    /// Polls a specific ready task once, ignoring the policy.
    ///
    /// Returns `false` if the task is not in the ready queue.
    pub fn step_task(&self, id: TaskId) -> bool {
        let task = {
            let mut ready = self.inner.ready_queue.lock();
            ready
                .iter()
                .position(|t| t.id == id)
                .and_then(|pos| ready.remove(pos))
        };

        match task {
            Some(task) => {
                self.poll_task(task);
                true
            }
            None => false,
        }
    }

    /// Steps until the ready queue is empty.
    ///
    /// Returns the number of polls. Parked tasks stay parked.
    pub fn run_until_stalled(&self) -> usize {
        let mut count = 0;
        while self.step() {
            count += 1;
        }
        count
    }

    /// Steps at most `max_steps` times.
    pub fn run_steps(&self, max_steps: usize) -> usize {
        let mut count = 0;
        while count < max_steps && self.step() {
            count += 1;
        }
        count
    }

    fn poll_task(&self, mut task: Task) {
        let woken = Arc::new(Mutex::new(false));
        let waker = Waker::from(Arc::new(TaskWaker {
            executor: Arc::clone(&self.inner),
            id: task.id,
            woken_during_poll: Arc::clone(&woken),
        }));
        let mut cx = Context::from_waker(&waker);

        self.update_task_info(task.id, |info| info.state = TaskState::Running);
        tracing::trace!(task = %task.id, "polling task");

        let poll = task.poll(&mut cx);
        let poll_count = task.poll_count;
        match poll {
            Poll::Ready(()) => {
                self.update_task_info(task.id, |info| {
                    info.state = TaskState::Completed;
                    info.poll_count = poll_count;
                });
            }
            Poll::Pending => {
                self.update_task_info(task.id, |info| {
                    info.state = TaskState::Scheduled;
                    info.poll_count = poll_count;
                });
                // Wakers check `waiting` and set the flag under this lock.
                let mut waiting = self.inner.waiting.lock();
                if *woken.lock() {
                    self.inner.ready_queue.lock().push_back(task);
                } else {
                    waiting.push(task);
                }
            }
        }
    }

    fn update_task_info<F>(&self, id: TaskId, f: F)
    where
        F: FnOnce(&mut TaskInfo),
    {
        let mut infos = self.inner.task_info.lock();
        if let Some(info) = infos.iter_mut().find(|i| i.id == id) {
            f(info);
        }
    }

    fn next_task(&self) -> Option<Task> {
        let mut ready = self.inner.ready_queue.lock();
        if ready.is_empty() {
            return None;
        }

        match self.inner.policy {
            SchedulingPolicy::Fifo => ready.pop_front(),
            SchedulingPolicy::Lifo => ready.pop_back(),
            SchedulingPolicy::SeededRandom(_) => {
                let mut state = self.inner.random_state.lock();
                let mut x = *state;
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                *state = x;

                #[allow(clippy::cast_possible_truncation)]
                let idx = (x % ready.len() as u64) as usize;
                ready.remove(idx)
            }
        }
    }
}

impl Default for SteppedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SteppedExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteppedExecutor")
            .field("policy", &self.inner.policy)
            .field("pending", &self.pending_count())
            .field("waiting", &self.waiting_count())
            .finish()
    }
}

impl Spawner for SteppedExecutor {
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _ = SteppedExecutor::spawn(self, future);
    }

    fn spawn_named<F>(&self, name: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _ = SteppedExecutor::spawn_named(self, name, future);
    }

    fn settle(&self) -> usize {
        self.run_until_stalled()
    }
}

/// Moves a parked task back to the ready queue.
struct TaskWaker {
    executor: Arc<ExecutorInner>,
    id: TaskId,
    woken_during_poll: Arc<Mutex<bool>>,
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut waiting = self.executor.waiting.lock();
        if let Some(pos) = waiting.iter().position(|t| t.id == self.id) {
            let task = waiting.remove(pos);
            self.executor.ready_queue.lock().push_back(task);
        } else {
            // Still being polled; requeue once the poll returns.
            *self.woken_during_poll.lock() = true;
        }
    }
}
