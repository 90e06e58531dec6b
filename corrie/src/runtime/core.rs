use crate::reactor::{Reactor, ReactorHandle};
use crate::runtime::context::enter_context;
use crate::runtime::queue::RunQueueHandle;
use crate::runtime::task;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::sync::mpsc;

use tracing::instrument;

/// The main runtime handle.
///
/// `Runtime` is responsible for:
/// - spawning asynchronous tasks onto its single run queue,
/// - driving the reactor (I/O readiness and timers),
/// - providing a synchronous entry point via [`block_on`](Self::block_on).
///
/// All scheduling happens on the thread that calls `block_on`; there is
/// no worker pool.
pub struct Runtime {
    reactor: ReactorHandle,
    run_queue: RunQueueHandle,

    /// Guards against `block_on` being called re-entrantly from within a
    /// task already running on this runtime.
    active: Rc<Cell<bool>>,
}

impl Runtime {
    /// Creates a new runtime instance with a freshly started reactor.
    pub(crate) fn new() -> Self {
        let reactor = Reactor::new();
        let poller_waker = reactor.borrow().poller_waker();
        let run_queue = RunQueueHandle::new(poller_waker);

        Self {
            reactor,
            run_queue,
            active: Rc::new(Cell::new(false)),
        }
    }

    /// Spawns a future onto the runtime's run queue.
    ///
    /// The future begins making progress the next time `block_on` drains
    /// the queue; it is not polled inline.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        enter_context(self.reactor.clone(), self.run_queue.clone(), || {
            task::spawn(future);
        });
    }

    /// Runs a future to completion, driving the run queue and the
    /// reactor on the calling thread until it resolves.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from within a task running on this
    /// same runtime.
    #[instrument(skip_all)]
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        assert!(
            !self.active.replace(true),
            "block_on called re-entrantly on the same runtime"
        );

        let (transmitter, receiver) = mpsc::channel();

        let result = enter_context(self.reactor.clone(), self.run_queue.clone(), || {
            task::spawn(async move {
                let result = future.await;
                let _ = transmitter.send(result);
            });

            loop {
                for task in self.run_queue.drain() {
                    task.run();
                }

                if let Ok(result) = receiver.try_recv() {
                    return result;
                }

                self.reactor.borrow_mut().turn();

                if let Ok(result) = receiver.try_recv() {
                    return result;
                }
            }
        });

        self.active.set(false);
        result
    }
}
