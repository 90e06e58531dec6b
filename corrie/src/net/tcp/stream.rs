use crate::error::{Error, Result};
use crate::io::{AsyncRead, AsyncWrite};
use crate::reactor::future::{ConnectFuture, ReadFuture, WriteFuture};
use crate::reactor::poller::platform::{
    RawFd, sockaddr_storage_to_socketaddr, sys_close, sys_ipv6_is_necessary, sys_parse_sockaddr,
    sys_set_reuseaddr, sys_shutdown, sys_socket,
};

use std::fmt;
use std::net::Shutdown;
use std::sync::Arc;

use tracing::debug;

/// The raw socket shared between a [`TcpStream`] and its owned halves.
///
/// Closed on drop, once the last owner (the stream or both of its halves)
/// goes out of scope.
#[derive(Debug)]
struct Inner {
    fd: RawFd,
}

impl Drop for Inner {
    fn drop(&mut self) {
        debug!(fd = self.fd, "closing tcp connection");
        sys_close(self.fd);
    }
}

/// An asynchronous, non-blocking TCP connection.
///
/// A `TcpStream` must be created and used **inside a running runtime**: its
/// `read`/`write`/`connect` futures register with the reactor in the current
/// thread's context when they would otherwise block.
#[derive(Debug)]
pub struct TcpStream {
    inner: Arc<Inner>,
}

impl TcpStream {
    /// Wraps an already-connected, non-blocking socket file descriptor.
    pub(crate) fn from_raw_fd(fd: RawFd) -> Self {
        Self {
            inner: Arc::new(Inner { fd }),
        }
    }

    /// Establishes a TCP connection to `address`.
    ///
    /// The address must be a string accepted by `SocketAddr::from_str`,
    /// e.g. `"127.0.0.1:8080"` or `"[::1]:8080"`.
    pub async fn connect(address: &str) -> Result<Self> {
        let (storage, _) = sys_parse_sockaddr(address)?;
        let addr = sockaddr_storage_to_socketaddr(&storage)?;

        let domain = storage.ss_family as i32;
        let fd = sys_socket(domain)?;

        sys_set_reuseaddr(fd)?;
        sys_ipv6_is_necessary(fd, domain)?;

        ConnectFuture::new(fd, addr).await?;

        Ok(Self::from_raw_fd(fd))
    }

    /// Reads up to `buffer.len()` bytes, returning `0` on orderly EOF.
    pub async fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        Ok(ReadFuture::new(self.inner.fd, buffer).await?)
    }

    /// Reads exactly `buffer.len()` bytes, or fails with
    /// [`Error::UnexpectedEof`] if the stream closes first.
    pub async fn read_exact(&self, buffer: &mut [u8]) -> Result<()> {
        let mut filled = 0;

        while filled < buffer.len() {
            let n = self.read(&mut buffer[filled..]).await?;

            if n == 0 {
                return Err(Error::UnexpectedEof);
            }

            filled += n;
        }

        Ok(())
    }

    /// Writes up to `buffer.len()` bytes, returning the number written.
    pub async fn write(&self, buffer: &[u8]) -> Result<usize> {
        Ok(WriteFuture::new(self.inner.fd, buffer).await?)
    }

    /// Writes the entire buffer, turning a zero-byte write into
    /// [`Error::WriteZero`].
    pub async fn write_all(&self, mut buffer: &[u8]) -> Result<()> {
        while !buffer.is_empty() {
            let n = self.write(buffer).await?;

            if n == 0 {
                return Err(Error::WriteZero);
            }

            buffer = &buffer[n..];
        }

        Ok(())
    }

    /// Shuts down the read, write, or both halves of this connection.
    pub fn shutdown(&self, how: Shutdown) -> Result<()> {
        Ok(sys_shutdown(self.inner.fd, how)?)
    }

    /// Consumes the stream, returning an owned read half and write half
    /// that share the same underlying socket.
    ///
    /// The two halves can be rejoined with [`OwnedReadHalf::reunite`].
    pub fn into_split(self) -> (OwnedReadHalf, OwnedWriteHalf) {
        (
            OwnedReadHalf {
                inner: self.inner.clone(),
            },
            OwnedWriteHalf { inner: self.inner },
        )
    }
}

/// The owned read half of a [`TcpStream`], created by
/// [`TcpStream::into_split`].
#[derive(Debug)]
pub struct OwnedReadHalf {
    inner: Arc<Inner>,
}

impl OwnedReadHalf {
    /// Reads up to `buffer.len()` bytes, returning `0` on orderly EOF.
    pub async fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        Ok(ReadFuture::new(self.inner.fd, buffer).await?)
    }

    /// Reads exactly `buffer.len()` bytes, or fails with
    /// [`Error::UnexpectedEof`] if the stream closes first.
    pub async fn read_exact(&self, buffer: &mut [u8]) -> Result<()> {
        let mut filled = 0;

        while filled < buffer.len() {
            let n = self.read(&mut buffer[filled..]).await?;

            if n == 0 {
                return Err(Error::UnexpectedEof);
            }

            filled += n;
        }

        Ok(())
    }

    /// Rejoins this half with `write` into the original [`TcpStream`],
    /// iff both halves originate from the same stream.
    ///
    /// Fails with [`ReuniteError`] without consuming either half when they
    /// do not share an origin; the halves are returned inside the error.
    pub fn reunite(
        self,
        write: OwnedWriteHalf,
    ) -> std::result::Result<TcpStream, ReuniteError> {
        if Arc::ptr_eq(&self.inner, &write.inner) {
            drop(self);
            Ok(TcpStream { inner: write.inner })
        } else {
            Err(ReuniteError(self, write))
        }
    }
}

/// Returned by [`OwnedReadHalf::reunite`] when the two halves do not share
/// an origin; carries both halves back so the caller isn't forced to
/// discard them.
pub struct ReuniteError(pub OwnedReadHalf, pub OwnedWriteHalf);

impl fmt::Debug for ReuniteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReuniteError").finish_non_exhaustive()
    }
}

impl fmt::Display for ReuniteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tried to reunite halves from different streams")
    }
}

impl std::error::Error for ReuniteError {}

/// The owned write half of a [`TcpStream`], created by
/// [`TcpStream::into_split`].
#[derive(Debug)]
pub struct OwnedWriteHalf {
    inner: Arc<Inner>,
}

impl OwnedWriteHalf {
    /// Writes up to `buffer.len()` bytes, returning the number written.
    pub async fn write(&self, buffer: &[u8]) -> Result<usize> {
        Ok(WriteFuture::new(self.inner.fd, buffer).await?)
    }

    /// Writes the entire buffer, turning a zero-byte write into
    /// [`Error::WriteZero`].
    pub async fn write_all(&self, mut buffer: &[u8]) -> Result<()> {
        while !buffer.is_empty() {
            let n = self.write(buffer).await?;

            if n == 0 {
                return Err(Error::WriteZero);
            }

            buffer = &buffer[n..];
        }

        Ok(())
    }
}

impl AsyncRead for TcpStream {
    async fn read(&self, buf: &mut [u8]) -> Result<usize> {
        TcpStream::read(self, buf).await
    }
}

impl AsyncWrite for TcpStream {
    async fn write(&self, buf: &[u8]) -> Result<usize> {
        TcpStream::write(self, buf).await
    }

    async fn write_all(&self, buf: &[u8]) -> Result<()> {
        TcpStream::write_all(self, buf).await
    }
}

impl AsyncRead for OwnedReadHalf {
    async fn read(&self, buf: &mut [u8]) -> Result<usize> {
        OwnedReadHalf::read(self, buf).await
    }
}

impl AsyncWrite for OwnedWriteHalf {
    async fn write(&self, buf: &[u8]) -> Result<usize> {
        OwnedWriteHalf::write(self, buf).await
    }

    async fn write_all(&self, buf: &[u8]) -> Result<()> {
        OwnedWriteHalf::write_all(self, buf).await
    }
}
