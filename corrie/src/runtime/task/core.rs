use super::JoinHandle;
use super::state::{CANCELLED, COMPLETED, IDLE, NOTIFIED, QUEUED, RUNNING};
use crate::runtime::context::CURRENT_RUNQUEUE;
use crate::runtime::queue::RunQueueHandle;
use crate::runtime::task::waker::make_waker;

use std::cell::UnsafeCell;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use tracing::trace;

/// A runnable unit of work that can be executed by the scheduler.
///
/// The `Runnable` trait abstracts the specific return type of a task,
/// allowing the runtime to manage a heterogeneous collection of tasks
/// through `Arc<dyn Runnable>`.
pub(crate) trait Runnable: Send + Sync {
    /// Executes the task.
    fn run(self: Arc<Self>);
}

/// A spawned asynchronous task managed by the runtime.
///
/// A `Task` acts as the container for a `Future`. It coordinates the
/// lifecycle of that future, including its execution state, waker
/// registration, and result storage.
pub(crate) struct Task<T> {
    /// The underlying future.
    ///
    /// Wrapped in `UnsafeCell` for interior mutability during `poll`, and
    /// `Pin<Box<...>>` to ensure the future remains pinned in memory.
    future: UnsafeCell<Pin<Box<dyn Future<Output = T> + Send>>>,

    /// Storage for the result produced by the future upon completion.
    pub(crate) result: UnsafeCell<Option<T>>,

    /// The current lifecycle state of the task (IDLE, RUNNING, etc.).
    pub(crate) state: AtomicUsize,

    /// Handle to the runtime's run queue, used to reschedule this task.
    ///
    /// Stored directly on the task (rather than looked up from a
    /// thread-local) because `wake()` may run on a foreign OS thread,
    /// e.g. the offload thread behind `execute`.
    run_queue: RunQueueHandle,

    /// A list of wakers belonging to `JoinHandle`s awaiting this task.
    pub(crate) waiters: Mutex<Vec<Waker>>,
}

unsafe impl<T> Send for Task<T> {}
unsafe impl<T> Sync for Task<T> {}

impl<T: Send + 'static> Task<T> {
    /// Creates a new task instance from a future.
    ///
    /// The task is initialized in the `QUEUED` state, indicating it is
    /// ready to be processed by the scheduler.
    pub(crate) fn new<F>(future: F, run_queue: RunQueueHandle) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            future: UnsafeCell::new(Box::pin(future)),
            result: UnsafeCell::new(None),
            state: AtomicUsize::new(QUEUED),
            run_queue,
            waiters: Mutex::new(Vec::new()),
        }
    }

    /// Performs the execution of the task.
    ///
    /// This method transitions the task to `RUNNING`, polls the inner
    /// future, and handles the resulting `Poll` state:
    /// - `Poll::Pending`: Transitions back to `IDLE` or re-queues if
    ///   notified while running.
    /// - `Poll::Ready`: Stores the result and notifies all `JoinHandle`
    ///   waiters.
    pub(crate) fn run(self: Arc<Self>) {
        let current = self.state.load(Ordering::Acquire);

        if current == CANCELLED || (current != QUEUED && current != NOTIFIED) {
            return;
        }

        if self
            .state
            .compare_exchange(current, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let waker = make_waker(self.clone());
        let mut cx = Context::from_waker(&waker);

        // Safety: the RUNNING state guarantees no other poll of this
        // future is in flight.
        let poll = unsafe { (&mut *self.future.get()).as_mut().poll(&mut cx) };

        match poll {
            Poll::Pending => {
                if self
                    .state
                    .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    // Woken while running; reschedule immediately.
                    self.state.store(QUEUED, Ordering::Release);
                    self.run_queue.push(self.clone());
                }
            }
            Poll::Ready(val) => {
                unsafe {
                    *self.result.get() = Some(val);
                }
                self.state.store(COMPLETED, Ordering::Release);

                let waiters = self.waiters.lock().unwrap();
                for w in waiters.iter() {
                    w.wake_by_ref();
                }
            }
        }
    }

    /// Signals the task to be rescheduled.
    ///
    /// If the task is `IDLE`, it moves to `QUEUED` and is pushed onto the
    /// run queue. If the task is `RUNNING`, it moves to `NOTIFIED` so it
    /// is re-polled immediately after its current execution slice.
    pub fn wake(self: Arc<Self>) {
        loop {
            let state = self.state.load(Ordering::Acquire);

            match state {
                IDLE => {
                    if self
                        .state
                        .compare_exchange(IDLE, QUEUED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        self.run_queue.push(self.clone());
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                QUEUED | NOTIFIED | COMPLETED | CANCELLED => return,
                _ => return,
            }
        }
    }

    /// Aborts the task execution.
    ///
    /// Transitions the task to the `CANCELLED` state. If the transition
    /// succeeds, all waiters are notified so they can stop awaiting the
    /// result.
    pub fn abort(&self) {
        loop {
            let state = self.state.load(Ordering::Acquire);

            if state == COMPLETED || state == CANCELLED {
                return;
            }

            if self
                .state
                .compare_exchange(state, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let waiters = self.waiters.lock().unwrap();
                for w in waiters.iter() {
                    w.wake_by_ref();
                }
                break;
            }
        }
    }
}

impl<T: Send + 'static> Runnable for Task<T> {
    fn run(self: Arc<Self>) {
        Task::run(self)
    }
}

/// Spawns a future as a task onto the current runtime.
///
/// # Panics
/// Panics if called outside the context of a running runtime.
pub fn spawn<F, T>(future: F) -> JoinHandle<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    let run_queue = CURRENT_RUNQUEUE.with(|cell| {
        cell.borrow()
            .as_ref()
            .expect("spawn must be called within the context of a runtime")
            .clone()
    });

    let task = Arc::new(Task::new(future, run_queue.clone()));

    trace!("spawning task");
    run_queue.push(task.clone());

    JoinHandle { task }
}
