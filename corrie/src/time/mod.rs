//! Time-related asynchronous utilities.
//!
//! This module provides time-related asynchronous utilities that
//! integrate with the runtime reactor.
//!
//! It includes:
//! - [`sleep`] for scheduling timers,
//! - [`timeout`] for bounding future execution time.

mod sleep;
mod timeout;

#[doc(inline)]
pub use sleep::sleep;

#[doc(inline)]
pub use timeout::timeout;
