use super::event::Event;
use super::poller::common::Interest;
use super::poller::platform::RawFd;
use super::poller::{Poller, Waker as PollerWaker};
use super::sources::IoEntry;
use super::timer::TimerEntry;

use std::cell::RefCell;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::task::Waker;
use std::time::{Duration, Instant};

use tracing::trace;

/// Thread-confined handle to the reactor.
///
/// Registration only ever happens on the thread driving
/// [`crate::runtime::core::Runtime::block_on`], since that is the only
/// thread that polls a future. A reference-counted, interior-mutable
/// handle is therefore enough; no cross-thread locking is required here
/// (cross-thread wakeups, e.g. from `execute`'s offload thread, go
/// through the poller's `eventfd`-backed [`PollerWaker`] instead, which
/// is `Send + Sync`).
pub(crate) type ReactorHandle = Rc<RefCell<Reactor>>;

/// Drives I/O readiness and timers for the single-threaded runtime.
pub(crate) struct Reactor {
    poller: Poller,
    sources: HashMap<RawFd, IoEntry>,
    timers: BinaryHeap<TimerEntry>,
    events: Vec<Event>,
}

impl Reactor {
    pub(crate) fn new() -> ReactorHandle {
        Rc::new(RefCell::new(Self {
            poller: Poller::new(),
            sources: HashMap::new(),
            timers: BinaryHeap::new(),
            events: Vec::with_capacity(64),
        }))
    }

    /// Handle to the poller's wakeup source, used to interrupt a blocked
    /// `epoll_wait` from another OS thread.
    pub(crate) fn poller_waker(&self) -> Arc<PollerWaker> {
        self.poller.waker()
    }

    /// Registers interest in a file descriptor's readiness, waking `waker`
    /// the next time the reactor observes it.
    pub(crate) fn register(&mut self, fd: RawFd, waker: Waker, interest: Interest) {
        trace!(fd, read = interest.read, write = interest.write, "register");

        if self.sources.insert(fd, IoEntry::new(waker)).is_some() {
            self.poller.reregister(fd, fd as usize, interest);
        } else {
            self.poller.register(fd, fd as usize, interest);
        }
    }

    /// Removes a file descriptor from the reactor without waking it.
    pub(crate) fn deregister(&mut self, fd: RawFd) {
        if self.sources.remove(&fd).is_some() {
            trace!(fd, "deregister");
            self.poller.deregister(fd);
        }
    }

    /// Schedules `waker` to be called once `deadline` elapses, unless
    /// `cancelled` is set first.
    pub(crate) fn set_timer(
        &mut self,
        deadline: Instant,
        waker: Waker,
        cancelled: Arc<std::sync::atomic::AtomicBool>,
    ) {
        self.timers.push(TimerEntry {
            deadline,
            waker,
            cancelled,
        });
    }

    /// Blocks until at least one registered source is ready, the next
    /// timer fires, or the poller's wakeup source is triggered; then
    /// wakes every task whose wait was satisfied.
    pub(crate) fn turn(&mut self) {
        let timeout = self.next_timeout();

        if let Err(err) = self.poller.poll(&mut self.events, timeout) {
            tracing::debug!(%err, "reactor poll error");
        }

        let ready: Vec<RawFd> = self
            .events
            .drain(..)
            .map(|event: Event| event.token as RawFd)
            .collect();

        for fd in ready {
            if let Some(entry) = self.sources.remove(&fd) {
                entry.wake();
            }
        }

        self.fire_expired_timers();
    }

    fn next_timeout(&mut self) -> Option<Duration> {
        self.evict_cancelled_timers();

        self.timers
            .peek()
            .map(|t| t.deadline.saturating_duration_since(Instant::now()))
    }

    fn fire_expired_timers(&mut self) {
        let now = Instant::now();

        while let Some(top) = self.timers.peek() {
            if top.cancelled.load(Ordering::Acquire) {
                self.timers.pop();
                continue;
            }

            if top.deadline > now {
                break;
            }

            let entry = self.timers.pop().expect("peeked entry must exist");
            entry.waker.wake();
        }
    }

    fn evict_cancelled_timers(&mut self) {
        while matches!(self.timers.peek(), Some(t) if t.cancelled.load(Ordering::Acquire)) {
            self.timers.pop();
        }
    }
}
