//! # corrie
//!
//! A single-threaded async runtime built around a hand-rolled task
//! scheduler and an epoll-based reactor.
//!
//! corrie focuses on the essentials of an I/O runtime rather than
//! competing with general-purpose runtimes like Tokio or async-std: one
//! run queue, one reactor, and the primitives needed to drive TCP
//! connections through buffered, length-prefixed, HTTP, and WebSocket
//! framing.
//!
//! - A single-threaded **task scheduler** driving `block_on`
//! - An **epoll reactor** (Linux) for non-blocking TCP I/O and timers
//! - **Buffered streams** ([`io::BufReader`], [`io::BufWriter`], [`io::BufStream`])
//! - **Codecs** for fixed-length, varint-length-delimited, HTTP/1.1, and WebSocket framing
//! - [`sync::Latch`], a countdown rendezvous primitive
//! - [`execute`] for offloading blocking work onto a throwaway thread
//! - Macros: `#[corrie::main]`, `#[corrie::test]`, `join!`, `select!`
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use corrie::net::TcpStream;
//! use corrie::time::sleep;
//! use std::time::Duration;
//!
//! #[corrie::main]
//! async fn main() {
//!     let handle = corrie::task::spawn(async {
//!         sleep(Duration::from_millis(100)).await;
//!         println!("task completed");
//!     });
//!
//!     handle.await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`net`] — TCP listener/stream, owned split halves, name resolution
//! - [`io`] — buffered wrappers over [`io::AsyncRead`]/[`io::AsyncWrite`]
//! - [`codec`] — fixed-length, varint, HTTP, and WebSocket framing
//! - [`sync`] — the [`sync::Latch`] rendezvous primitive
//! - [`time`] — `sleep` and `timeout`
//! - [`error`] — the crate-wide [`error::Error`]/[`error::Result`]

mod reactor;
mod runtime;

mod offload;

pub mod codec;
pub mod error;
pub mod io;
pub mod net;
pub mod sync;
pub mod time;

pub use error::{Error, Result};
pub use offload::execute;
pub use runtime::builder::RuntimeBuilder;
pub use runtime::task;

pub use corrie_macros::*;
