use memchr::memmem;

/// A single-producer/single-consumer byte buffer with a fixed capacity.
///
/// Holds a read cursor `r` and a write cursor `w` over a byte region of
/// capacity `C`, maintaining `0 <= r <= w <= C`. The readable slice is
/// `[r, w)`; the writable slice is `[w, C)`.
pub struct StreamBuffer {
    data: Vec<u8>,
    r: usize,
    w: usize,
}

impl StreamBuffer {
    /// Creates a buffer with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            r: 0,
            w: 0,
        }
    }

    /// The buffer's fixed capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Whether the readable region is empty.
    pub fn is_empty(&self) -> bool {
        self.r == self.w
    }

    /// The number of readable bytes currently buffered.
    pub fn len(&self) -> usize {
        self.w - self.r
    }

    /// The readable slice `[r, w)`.
    pub fn readable(&self) -> &[u8] {
        &self.data[self.r..self.w]
    }

    /// Copies `min(w - r, dst.len())` bytes into `dst`, advancing `r`.
    ///
    /// Resets both cursors to `0` once the readable region is drained,
    /// so a subsequent write can use the full capacity again.
    pub fn write_to(&mut self, dst: &mut [u8]) -> usize {
        let n = self.len().min(dst.len());
        dst[..n].copy_from_slice(&self.data[self.r..self.r + n]);
        self.r += n;

        if self.r == self.w {
            self.r = 0;
            self.w = 0;
        }

        n
    }

    /// Copies `min(C - w, src.len())` bytes from `src`, advancing `w`.
    pub fn read_from(&mut self, src: &[u8]) -> usize {
        let n = (self.data.len() - self.w).min(src.len());
        self.data[self.w..self.w + n].copy_from_slice(&src[..n]);
        self.w += n;
        n
    }

    /// Compacts the buffer by shifting `[r, w)` down to offset `0`.
    pub fn reset_data(&mut self) {
        if self.r > 0 {
            self.data.copy_within(self.r..self.w, 0);
            self.w -= self.r;
            self.r = 0;
        }
    }

    /// Returns the readable prefix ending immediately after the first
    /// occurrence of `pattern`, or an empty slice if `pattern` does not
    /// occur in the readable region.
    pub fn find_flag(&self, pattern: &[u8]) -> &[u8] {
        if pattern.is_empty() {
            return &[];
        }

        let readable = self.readable();

        match memmem::find(readable, pattern) {
            Some(pos) => &readable[..pos + pattern.len()],
            None => &[],
        }
    }

    /// Discards `n` already-read bytes, advancing `r`.
    ///
    /// Used by buffered readers after copying matched bytes out of the
    /// buffer with [`Self::readable`] rather than [`Self::write_to`].
    pub(crate) fn consume(&mut self, n: usize) {
        self.r += n;

        if self.r == self.w {
            self.r = 0;
            self.w = 0;
        }
    }

    /// Compacts the buffer and exposes its writable region, for filling
    /// directly from an async source without an intermediate copy.
    pub(crate) fn writable_mut(&mut self) -> &mut [u8] {
        self.reset_data();
        &mut self.data[self.w..]
    }

    /// Commits `n` bytes written into the slice returned by
    /// [`Self::writable_mut`].
    pub(crate) fn advance_write(&mut self, n: usize) {
        self.w += n;
    }
}
