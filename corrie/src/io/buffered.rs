use crate::error::{Error, Result};
use crate::io::buffer::StreamBuffer;
use crate::io::traits::{AsyncRead, AsyncWrite};

/// Default buffer capacity used by [`BufReader::new`], [`BufWriter::new`],
/// and [`BufStream::new`].
const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Buffers reads from an inner [`AsyncRead`] source through a
/// [`StreamBuffer`].
pub struct BufReader<IO> {
    inner: IO,
    buf: StreamBuffer,
}

impl<IO: AsyncRead> BufReader<IO> {
    /// Wraps `inner` with a default-sized read buffer.
    pub fn new(inner: IO) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    /// Wraps `inner` with a read buffer of the given capacity.
    pub fn with_capacity(capacity: usize, inner: IO) -> Self {
        Self {
            inner,
            buf: StreamBuffer::new(capacity),
        }
    }

    /// Returns a reference to the wrapped source.
    pub fn get_ref(&self) -> &IO {
        &self.inner
    }

    /// Consumes the reader, returning the wrapped source. Any buffered,
    /// not-yet-consumed bytes are discarded.
    pub fn into_inner(self) -> IO {
        self.inner
    }

    async fn fill_buf(&mut self) -> Result<usize> {
        let n = self.inner.read(self.buf.writable_mut()).await?;
        self.buf.advance_write(n);
        Ok(n)
    }

    /// Reads up to `dst.len()` bytes.
    ///
    /// Reads larger than the buffer's capacity bypass it entirely once
    /// the buffer is empty, avoiding a pointless extra copy.
    pub async fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if self.buf.is_empty() {
            if dst.len() >= self.buf.capacity() {
                return self.inner.read(dst).await;
            }

            if self.fill_buf().await? == 0 {
                return Ok(0);
            }
        }

        Ok(self.buf.write_to(dst))
    }

    /// Reads exactly `dst.len()` bytes, failing with
    /// [`Error::UnexpectedEof`] on an early zero-byte read.
    pub async fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let mut filled = 0;

        while filled < dst.len() {
            let n = self.read(&mut dst[filled..]).await?;

            if n == 0 {
                return Err(Error::UnexpectedEof);
            }

            filled += n;
        }

        Ok(())
    }

    /// Reads into `out` up to and including the first occurrence of
    /// `terminator`, returning the number of bytes appended.
    ///
    /// Fails with [`Error::UnexpectedEof`] if the source closes before
    /// the terminator is seen.
    pub async fn read_until(&mut self, out: &mut Vec<u8>, terminator: &[u8]) -> Result<usize> {
        let mut total = 0;

        loop {
            let (consumed, found) = {
                let slice = self.buf.find_flag(terminator);

                if !slice.is_empty() {
                    out.extend_from_slice(slice);
                    (slice.len(), true)
                } else {
                    let readable = self.buf.readable();
                    out.extend_from_slice(readable);
                    (readable.len(), false)
                }
            };

            self.buf.consume(consumed);
            total += consumed;

            if found {
                return Ok(total);
            }

            if self.fill_buf().await? == 0 {
                return Err(Error::UnexpectedEof);
            }
        }
    }

    /// Reads a line terminated by `\n` (the terminator is included in
    /// `out`).
    pub async fn read_line(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        self.read_until(out, b"\n").await
    }
}

/// Buffers writes to an inner [`AsyncWrite`] sink through a
/// [`StreamBuffer`].
pub struct BufWriter<IO> {
    inner: IO,
    buf: StreamBuffer,
}

impl<IO: AsyncWrite> BufWriter<IO> {
    /// Wraps `inner` with a default-sized write buffer.
    pub fn new(inner: IO) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    /// Wraps `inner` with a write buffer of the given capacity.
    pub fn with_capacity(capacity: usize, inner: IO) -> Self {
        Self {
            inner,
            buf: StreamBuffer::new(capacity),
        }
    }

    /// Returns a reference to the wrapped sink.
    pub fn get_ref(&self) -> &IO {
        &self.inner
    }

    /// Flushes any buffered bytes to the inner sink.
    pub async fn flush(&mut self) -> Result<()> {
        while !self.buf.is_empty() {
            let mut chunk = vec![0u8; self.buf.len()];
            let n = self.buf.write_to(&mut chunk);
            self.inner.write_all(&chunk[..n]).await?;
        }

        Ok(())
    }

    /// Buffers up to `src.len()` bytes, flushing as needed. Writes at
    /// least as large as the buffer's capacity bypass it and go
    /// straight to the inner sink (after flushing whatever was already
    /// pending, to preserve ordering).
    pub async fn write(&mut self, src: &[u8]) -> Result<usize> {
        if src.len() >= self.buf.capacity() {
            self.flush().await?;
            return self.inner.write(src).await;
        }

        let mut remaining = src;

        while !remaining.is_empty() {
            let n = self.buf.read_from(remaining);

            if n == 0 {
                self.flush().await?;
                continue;
            }

            remaining = &remaining[n..];
        }

        Ok(src.len())
    }

    /// Writes the entire buffer and flushes it to the inner sink.
    pub async fn write_all(&mut self, src: &[u8]) -> Result<()> {
        self.write(src).await?;
        self.flush().await
    }
}

/// Composes a [`BufReader`] and a [`BufWriter`] over a single shared
/// I/O handle.
pub struct BufStream<IO> {
    inner: IO,
    read_buf: StreamBuffer,
    write_buf: StreamBuffer,
}

impl<IO: AsyncRead + AsyncWrite> BufStream<IO> {
    /// Wraps `inner` with default-sized read and write buffers.
    pub fn new(inner: IO) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, DEFAULT_CAPACITY, inner)
    }

    /// Wraps `inner` with read and write buffers of the given
    /// capacities.
    pub fn with_capacity(read_capacity: usize, write_capacity: usize, inner: IO) -> Self {
        Self {
            inner,
            read_buf: StreamBuffer::new(read_capacity),
            write_buf: StreamBuffer::new(write_capacity),
        }
    }

    async fn fill_buf(&mut self) -> Result<usize> {
        let n = self.inner.read(self.read_buf.writable_mut()).await?;
        self.read_buf.advance_write(n);
        Ok(n)
    }

    /// Reads up to `dst.len()` bytes. See [`BufReader::read`].
    pub async fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if self.read_buf.is_empty() {
            if dst.len() >= self.read_buf.capacity() {
                return self.inner.read(dst).await;
            }

            if self.fill_buf().await? == 0 {
                return Ok(0);
            }
        }

        Ok(self.read_buf.write_to(dst))
    }

    /// Reads exactly `dst.len()` bytes. See [`BufReader::read_exact`].
    pub async fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let mut filled = 0;

        while filled < dst.len() {
            let n = self.read(&mut dst[filled..]).await?;

            if n == 0 {
                return Err(Error::UnexpectedEof);
            }

            filled += n;
        }

        Ok(())
    }

    /// Reads through `terminator`. See [`BufReader::read_until`].
    pub async fn read_until(&mut self, out: &mut Vec<u8>, terminator: &[u8]) -> Result<usize> {
        let mut total = 0;

        loop {
            let (consumed, found) = {
                let slice = self.read_buf.find_flag(terminator);

                if !slice.is_empty() {
                    out.extend_from_slice(slice);
                    (slice.len(), true)
                } else {
                    let readable = self.read_buf.readable();
                    out.extend_from_slice(readable);
                    (readable.len(), false)
                }
            };

            self.read_buf.consume(consumed);
            total += consumed;

            if found {
                return Ok(total);
            }

            if self.fill_buf().await? == 0 {
                return Err(Error::UnexpectedEof);
            }
        }
    }

    /// Reads a line terminated by `\n`.
    pub async fn read_line(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        self.read_until(out, b"\n").await
    }

    /// Flushes any buffered write bytes to the inner sink.
    pub async fn flush(&mut self) -> Result<()> {
        while !self.write_buf.is_empty() {
            let mut chunk = vec![0u8; self.write_buf.len()];
            let n = self.write_buf.write_to(&mut chunk);
            self.inner.write_all(&chunk[..n]).await?;
        }

        Ok(())
    }

    /// Buffers a write. See [`BufWriter::write`].
    pub async fn write(&mut self, src: &[u8]) -> Result<usize> {
        if src.len() >= self.write_buf.capacity() {
            self.flush().await?;
            return self.inner.write(src).await;
        }

        let mut remaining = src;

        while !remaining.is_empty() {
            let n = self.write_buf.read_from(remaining);

            if n == 0 {
                self.flush().await?;
                continue;
            }

            remaining = &remaining[n..];
        }

        Ok(src.len())
    }

    /// Writes the entire buffer and flushes it. See
    /// [`BufWriter::write_all`].
    pub async fn write_all(&mut self, src: &[u8]) -> Result<()> {
        self.write(src).await?;
        self.flush().await
    }
}
