//! Synchronization primitives for the runtime.
//!
//! These primitives are designed to work with the task scheduler and
//! reactor, letting tasks rendezvous without blocking the event loop.
//!
//! The current primitives include:
//! - [`Latch`] — a countdown rendezvous primitive with single-shot
//!   notify-all of waiters.

mod latch;

pub use latch::Latch;
