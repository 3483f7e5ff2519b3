//! A readable view over a fixed byte region.

use std::io::{self, BufRead, Read};

use bytes::Bytes;

use crate::error::{Result, StreamError};
use crate::util::check_range;

const COMPONENT: &str = "MemoryReader";

/// Reads from an immutable, fixed-length byte region with a cursor.
///
/// The content never grows and is never refilled. Once the cursor reaches the
/// end every read reports end of stream.
///
/// # Example
///
/// ```
/// use bytestreams::MemoryReader;
///
/// let mut reader = MemoryReader::new(&b"This is true"[..]);
/// let mut dest = [0u8; 32];
///
/// assert_eq!(reader.read_all_into(&mut dest)?, Some(12));
/// assert_eq!(&dest[..12], b"This is true");
/// assert_eq!(reader.read_all_into(&mut dest)?, None);
/// # Ok::<(), bytestreams::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryReader {
    data: Option<Bytes>,
    position: usize,
}

impl MemoryReader {
    /// Creates a reader over `data` without copying it.
    ///
    /// `Bytes` is immutable and reference counted, so the reader shares the
    /// storage with the caller and nobody can change it underneath.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: Some(data.into()),
            position: 0,
        }
    }

    /// Creates a reader over a private copy of `src[offset..offset + length]`.
    ///
    /// Later changes to `src` do not affect the reader.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if the region does not fit `src`.
    pub fn copy_from(src: &[u8], offset: usize, length: usize) -> Result<Self> {
        check_range(src.len(), offset, length)?;
        Ok(Self::new(Bytes::copy_from_slice(&src[offset..offset + length])))
    }

    /// Reads a single byte. Returns `Ok(None)` once the content is exhausted.
    pub fn read_one(&mut self) -> Result<Option<u8>> {
        let data = self.data()?;
        let Some(&byte) = data.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(byte))
    }

    /// Copies up to `length` bytes into `dest[offset..offset + length]`.
    ///
    /// Returns `Ok(None)` if nothing is left. Otherwise copies
    /// `min(length, remaining)` bytes and returns that count; a short count
    /// means the end of the content was reached.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if the range does not fit `dest`, and
    /// [`StreamError::Closed`] after close.
    pub fn read_into(
        &mut self,
        dest: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<Option<usize>> {
        let position = self.position;
        let data = self.data()?;
        check_range(dest.len(), offset, length)?;

        let remaining = data.len() - position;
        if remaining == 0 {
            return Ok(None);
        }

        let n = length.min(remaining);
        dest[offset..offset + n].copy_from_slice(&data[position..position + n]);
        self.position += n;
        Ok(Some(n))
    }

    /// Shorthand for `read_into(dest, 0, dest.len())`.
    pub fn read_all_into(&mut self, dest: &mut [u8]) -> Result<Option<usize>> {
        let len = dest.len();
        self.read_into(dest, 0, len)
    }

    /// Releases the content. Every later read fails with [`StreamError::Closed`].
    pub fn close(&mut self) -> Result<()> {
        if self.data.take().is_some() {
            tracing::debug!(position = self.position, "closing memory reader");
        }
        Ok(())
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.data.is_none()
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns how many bytes are left to read, or 0 once closed.
    pub fn remaining(&self) -> usize {
        self.data
            .as_ref()
            .map_or(0, |d| d.len() - self.position)
    }

    fn data(&self) -> Result<&Bytes> {
        self.data.as_ref().ok_or(StreamError::Closed {
            component: COMPONENT,
        })
    }
}

impl Read for MemoryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_all_into(buf)?.unwrap_or(0))
    }
}

impl BufRead for MemoryReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let position = self.position;
        Ok(&self.data()?[position..])
    }

    fn consume(&mut self, amt: usize) {
        self.position += amt.min(self.remaining());
    }
}

impl From<Vec<u8>> for MemoryReader {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
