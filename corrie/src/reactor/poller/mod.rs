//! Platform I/O poller.
//!
//! The reactor drives readiness through a single Linux `epoll` backend.
//! The poller is used to:
//! - wait for I/O readiness events,
//! - expose a `Send + Sync` wakeup source so other OS threads (e.g. the
//!   `execute` offload thread) can interrupt a blocked poll,
//! - integrate OS-level notifications with task wakers.

pub(crate) mod common;
pub(crate) mod epoll;
pub(crate) mod unix;

pub(crate) use common::Waker;
pub(crate) use unix as platform;

pub(crate) type Poller = epoll::EpollPoller;
