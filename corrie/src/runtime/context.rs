use crate::reactor::ReactorHandle;
use crate::runtime::queue::RunQueueHandle;

use std::cell::RefCell;

thread_local! {
    /// Thread-local handle to the current reactor.
    ///
    /// This is set when entering the runtime context and allows
    /// runtime components (timers, I/O, etc.) to access the reactor
    /// without explicit parameter passing.
    pub(crate) static CURRENT_REACTOR: RefCell<Option<ReactorHandle>> =
        const { RefCell::new(None) };

    /// Thread-local handle to the runtime's single run queue.
    ///
    /// Used by `task::spawn` and `Task::wake` to schedule a task for
    /// polling.
    pub(crate) static CURRENT_RUNQUEUE: RefCell<Option<RunQueueHandle>> =
        const { RefCell::new(None) };
}

/// Enters the runtime execution context for the current thread.
///
/// This function temporarily installs thread-local runtime state
/// (reactor and run queue handles) for the duration of the closure `f`.
/// After the closure completes, the previous context is restored.
///
/// This mechanism allows deeply nested runtime components to access
/// shared execution state without passing handles through every API.
pub(crate) fn enter_context<R>(
    reactor: ReactorHandle,
    run_queue: RunQueueHandle,
    f: impl FnOnce() -> R,
) -> R {
    CURRENT_REACTOR.with(|r| {
        CURRENT_RUNQUEUE.with(|q| {
            let prev_r = r.replace(Some(reactor));
            let prev_q = q.replace(Some(run_queue));

            let out = f();

            q.replace(prev_q);
            r.replace(prev_r);

            out
        })
    })
}
