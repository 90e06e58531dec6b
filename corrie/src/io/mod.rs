//! Buffered I/O built on a fixed-capacity cursor buffer.
//!
//! [`StreamBuffer`] is the single-producer/single-consumer byte buffer
//! that [`BufReader`], [`BufWriter`], and [`BufStream`] compose with an
//! arbitrary [`AsyncRead`]/[`AsyncWrite`] source.

mod buffer;
mod buffered;
mod traits;

pub use buffer::StreamBuffer;
pub use buffered::{BufReader, BufStream, BufWriter};
pub use traits::{AsyncRead, AsyncWrite};
