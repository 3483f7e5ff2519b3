//! An appendable byte buffer that grows on demand.
//!
//! Growth is lazy: storage is reallocated only at the point a write would
//! overflow it. Each step moves capacity to `floor(old * 1.5) + 1` and copies
//! the committed bytes across. A large write keeps stepping until the region
//! fits, so a 12-byte write into a 2-byte buffer walks `2 -> 4 -> 7 -> 11 -> 17`.

use std::io::{self, Write};

use bytes::Bytes;

use crate::config::{DEFAULT_CAPACITY, next_capacity};
use crate::error::{Result, StreamError};
use crate::util::check_write_range;

const COMPONENT: &str = "MemoryWriter";

/// A growable in-memory write destination.
///
/// Invariant: `position <= capacity`, and `buffer[..position]` is the
/// committed content.
///
/// # Example
///
/// ```
/// use bytestreams::MemoryWriter;
///
/// let mut writer = MemoryWriter::with_capacity(2);
/// writer.write_all_from(b"This is true")?;
///
/// assert_eq!(writer.capacity(), 17);
/// assert_eq!(writer.to_bytes()?, &b"This is true"[..]);
/// # Ok::<(), bytestreams::StreamError>(())
/// ```
#[derive(Debug)]
pub struct MemoryWriter {
    buffer: Option<Box<[u8]>>,
    position: usize,
}

impl MemoryWriter {
    /// Creates a writer with the default 8 KiB of storage.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a writer with `capacity` bytes of storage.
    ///
    /// Zero is allowed; the first write grows it to one byte.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Some(vec![0u8; capacity].into_boxed_slice()),
            position: 0,
        }
    }

    /// Appends one byte, growing one step first if storage is full.
    ///
    /// # Errors
    ///
    /// [`StreamError::Closed`] after close, and
    /// [`StreamError::CapacityRejected`] if growth would overflow `usize`.
    pub fn write_one(&mut self, byte: u8) -> Result<()> {
        let capacity = self.storage()?.len();
        if self.position == capacity {
            self.grow()?;
        }

        let position = self.position;
        self.storage()?[position] = byte;
        self.position += 1;
        Ok(())
    }

    /// Appends `src[offset..offset + length]`, growing until it fits.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if the range does not fit `src` or
    /// `length` is zero, [`StreamError::Closed`] after close, and
    /// [`StreamError::CapacityRejected`] if growth would overflow `usize`.
    pub fn write_from(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        self.storage()?;
        check_write_range(src.len(), offset, length)?;

        while length > self.capacity() - self.position {
            self.grow()?;
        }

        let position = self.position;
        self.storage()?[position..position + length].copy_from_slice(&src[offset..offset + length]);
        self.position += length;
        Ok(())
    }

    /// Shorthand for `write_from(src, 0, src.len())`.
    pub fn write_all_from(&mut self, src: &[u8]) -> Result<()> {
        self.write_from(src, 0, src.len())
    }

    /// Returns a fresh copy of the committed content.
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::copy_from_slice(self.committed()?))
    }

    /// Returns a fresh copy of the committed content as a `Vec`.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(self.committed()?.to_vec())
    }

    /// Writes the committed content to `sink` in one call, then flushes and
    /// closes (drops) the sink.
    ///
    /// The writer is emptied but stays open for reuse.
    pub fn drain_to<W: Write>(&mut self, mut sink: W) -> Result<()> {
        sink.write_all(self.committed()?)?;
        tracing::trace!(bytes = self.position, "drained memory writer");
        self.position = 0;
        sink.flush()?;
        drop(sink);
        Ok(())
    }

    /// Releases the storage. Every later operation fails with [`StreamError::Closed`].
    pub fn close(&mut self) -> Result<()> {
        if self.buffer.take().is_some() {
            tracing::debug!(len = self.position, "closing memory writer");
        }
        Ok(())
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Returns the current storage size, or 0 once closed.
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Returns the number of committed bytes.
    pub fn len(&self) -> usize {
        self.position
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Reallocates to the next capacity step, keeping the committed bytes.
    fn grow(&mut self) -> Result<()> {
        let old = self.capacity();
        let new = next_capacity(old).ok_or(StreamError::CapacityRejected {
            requested: old,
            message: "growth would overflow usize",
        })?;

        let mut grown = vec![0u8; new].into_boxed_slice();
        grown[..self.position].copy_from_slice(self.committed()?);
        self.buffer = Some(grown);

        tracing::trace!(from = old, to = new, "grew memory writer");
        Ok(())
    }

    fn committed(&self) -> Result<&[u8]> {
        let buffer = self.buffer.as_deref().ok_or(StreamError::Closed {
            component: COMPONENT,
        })?;
        Ok(&buffer[..self.position])
    }

    fn storage(&mut self) -> Result<&mut [u8]> {
        self.buffer.as_deref_mut().ok_or(StreamError::Closed {
            component: COMPONENT,
        })
    }
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.storage()?;
        if buf.is_empty() {
            return Ok(0);
        }
        self.write_all_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
