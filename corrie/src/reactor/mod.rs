//! Reactor: I/O readiness and timers for the single-threaded runtime.
//!
//! The reactor owns the platform poller, the table of registered I/O
//! sources, and the timer min-heap. Registration always happens on the
//! thread driving `Runtime::block_on` (the only thread that ever polls a
//! future), so the reactor is reached through a thread-confined,
//! reference-counted handle rather than a cross-thread command channel.
//!
//! Most runtime users do not interact with the reactor directly; it is an
//! internal component used by `TcpStream`, `TcpListener`, and `sleep`.

mod reactor;
mod timer;

pub(crate) mod event;
pub(crate) mod future;
pub(crate) mod poller;
pub(crate) mod sources;

pub(crate) use reactor::{Reactor, ReactorHandle};
