use crate::reactor::poller::Waker as PollerWaker;
use crate::runtime::task::core::Runnable;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Thread-safe handle to the runtime's single run queue.
///
/// `Runtime::block_on` is the only thread that ever pops from the queue,
/// but a task can be woken from another OS thread (e.g. `execute`'s
/// offload thread finishing and calling the task's waker), so the queue
/// itself is a plain `Mutex`-guarded `VecDeque` rather than a thread-local
/// structure. Pushing a task also pokes the reactor's poller wakeup
/// source so a blocked `epoll_wait` on the runtime thread returns
/// promptly and drains the queue.
#[derive(Clone)]
pub(crate) struct RunQueueHandle {
    inner: Arc<Mutex<VecDeque<Arc<dyn Runnable>>>>,
    poller_waker: Arc<PollerWaker>,
}

impl RunQueueHandle {
    pub(crate) fn new(poller_waker: Arc<PollerWaker>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            poller_waker,
        }
    }

    /// Pushes a runnable task and wakes the runtime thread if it is
    /// currently blocked inside the reactor.
    pub(crate) fn push(&self, task: Arc<dyn Runnable>) {
        self.inner.lock().unwrap().push_back(task);
        self.poller_waker.wake();
    }

    /// Drains every task currently queued, leaving the queue empty.
    pub(crate) fn drain(&self) -> VecDeque<Arc<dyn Runnable>> {
        std::mem::take(&mut *self.inner.lock().unwrap())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
