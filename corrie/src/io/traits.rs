use crate::error::Result;

use std::future::Future;

/// An asynchronous byte source.
///
/// Implemented by [`crate::net::TcpStream`] and its owned halves; codecs
/// and buffered wrappers are generic over this trait rather than over a
/// concrete stream type.
pub trait AsyncRead {
    /// Reads up to `buf.len()` bytes, returning `0` on orderly EOF.
    fn read(&self, buf: &mut [u8]) -> impl Future<Output = Result<usize>> + Send;
}

/// An asynchronous byte sink.
pub trait AsyncWrite {
    /// Writes up to `buf.len()` bytes, returning the number written.
    fn write(&self, buf: &[u8]) -> impl Future<Output = Result<usize>> + Send;

    /// Writes the entire buffer, looping over partial writes.
    fn write_all(&self, buf: &[u8]) -> impl Future<Output = Result<()>> + Send;
}
