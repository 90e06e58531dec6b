use std::task::Waker;

/// A single I/O wait registration in the reactor's source table.
///
/// Every `corrie` I/O future is a one-shot waiter: it registers with the
/// reactor at most once per readiness wait (on `WouldBlock`) and is
/// removed from the source table as soon as the descriptor becomes ready.
pub(crate) struct IoEntry {
    waker: Waker,
}

impl IoEntry {
    pub(crate) fn new(waker: Waker) -> Self {
        Self { waker }
    }

    /// Wakes the task that registered this entry.
    pub(crate) fn wake(self) {
        self.waker.wake();
    }
}
