//! Core runtime components.
//!
//! This module contains the fundamental building blocks of the runtime:
//! the single run queue, the task state machine, and the runtime
//! context that threads the reactor and run queue through to `spawn`ed
//! futures without explicit parameter passing.
//!
//! Most users will interact with higher-level APIs built on top of
//! these components rather than using this module directly.

mod core;
mod queue;

pub(crate) mod builder;
pub(crate) mod context;

pub mod task;

use core::Runtime;
