//! Fixed-capacity read buffer over any [`std::io::Read`] source.
//!
//! [`BufferedReader`] keeps a window `[position, count)` of bytes pulled from
//! the source. Single-byte reads are served from the window and refill it
//! when it runs dry. Bulk reads that the window cannot satisfy drain what is
//! buffered and then issue exactly one direct read against the source for the
//! rest, so a bulk read may come back short.
//!
//! # Example
//!
//! ```
//! use bytestreams::BufferedReader;
//!
//! let mut reader = BufferedReader::with_capacity(4, &b"This is true"[..])?;
//!
//! assert_eq!(reader.read_one()?, Some(b'T'));
//! assert_eq!(reader.buffered(), 3);
//!
//! let mut dest = [0u8; 8];
//! assert_eq!(reader.read_into(&mut dest, 0, 8)?, Some(8));
//! assert_eq!(&dest, b"his is t");
//! # Ok::<(), bytestreams::StreamError>(())
//! ```

use std::io::{self, BufRead, Read};

use crate::config::BufferConfig;
use crate::error::{Result, StreamError};
use crate::util::check_range;

const COMPONENT: &str = "BufferedReader";

/// A reader that amortizes small reads against an underlying source.
///
/// Invariant: `position <= count <= capacity`, and `buffer[position..count]`
/// holds valid bytes not yet handed to the caller.
#[derive(Debug)]
pub struct BufferedReader<R> {
    inner: Option<R>,
    buffer: Option<Box<[u8]>>,
    position: usize,
    count: usize,
}

impl<R: Read> BufferedReader<R> {
    /// Creates a reader with the default 8 KiB buffer.
    pub fn new(inner: R) -> Self {
        Self::from_parts(BufferConfig::default().capacity(), inner)
    }

    /// Creates a reader with a buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CapacityRejected`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize, inner: R) -> Result<Self> {
        Self::with_config(BufferConfig::new(capacity)?, inner)
    }

    /// Creates a reader sized by `config`.
    pub fn with_config(config: BufferConfig, inner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.capacity(), inner))
    }

    fn from_parts(capacity: usize, inner: R) -> Self {
        Self {
            inner: Some(inner),
            buffer: Some(vec![0u8; capacity].into_boxed_slice()),
            position: 0,
            count: 0,
        }
    }

    /// Reads a single byte, refilling the window from the source if it is empty.
    ///
    /// Returns `Ok(None)` at end of stream. Every further call also returns
    /// `Ok(None)` unless the source produces more data.
    pub fn read_one(&mut self) -> Result<Option<u8>> {
        if self.position >= self.count {
            self.fill()?;
            if self.position >= self.count {
                return Ok(None);
            }
        }

        let position = self.position;
        let (buffer, _) = self.parts()?;
        let byte = buffer[position];
        self.position += 1;
        Ok(Some(byte))
    }

    /// Reads up to `length` bytes into `dest[offset..offset + length]`.
    ///
    /// A request the window can satisfy never touches the source. A larger
    /// one drains the window and then makes one direct source read for the
    /// remainder, bypassing the buffer. The result may therefore be short;
    /// loop if you need the full amount.
    ///
    /// Returns `Ok(Some(0))` for an empty request or an offset equal to
    /// `dest.len()`, and `Ok(None)` only when nothing was buffered and the
    /// source reported end of stream.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if the range does not fit `dest` (nothing
    /// is copied), [`StreamError::Closed`] after close, and
    /// [`StreamError::Io`] for source failures. The window is drained before
    /// the source is asked, so on a source failure the drained bytes are
    /// already in `dest` and will not be returned again.
    pub fn read_into(
        &mut self,
        dest: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<Option<usize>> {
        self.ensure_open()?;
        check_range(dest.len(), offset, length)?;

        if offset == dest.len() || length == 0 {
            return Ok(Some(0));
        }

        let (position, count) = (self.position, self.count);
        let (buffer, _) = self.parts()?;
        let available = count - position;

        if length <= available {
            dest[offset..offset + length].copy_from_slice(&buffer[position..position + length]);
            self.position += length;
            return Ok(Some(length));
        }

        dest[offset..offset + available].copy_from_slice(&buffer[position..count]);
        self.position = count;

        let (_, inner) = self.parts()?;
        let direct = inner.read(&mut dest[offset + available..offset + length])?;

        tracing::trace!(
            drained = available,
            requested = length - available,
            direct,
            "bypassed read buffer"
        );

        if direct == 0 && available == 0 {
            Ok(None)
        } else {
            Ok(Some(available + direct))
        }
    }

    /// Shorthand for `read_into(dest, 0, dest.len())`.
    pub fn read_all_into(&mut self, dest: &mut [u8]) -> Result<Option<usize>> {
        let len = dest.len();
        self.read_into(dest, 0, len)
    }

    /// Discards the window and asks the source for a full buffer.
    fn fill(&mut self) -> Result<()> {
        self.position = 0;
        self.count = 0;
        let (buffer, inner) = self.parts()?;
        let capacity = buffer.len();
        let read = inner.read(buffer)?.min(capacity);
        self.count = read;

        tracing::trace!(capacity, read, "refilled read buffer");
        Ok(())
    }
}

impl<R> BufferedReader<R> {
    /// Releases the buffer and closes (drops) the source.
    ///
    /// Every later read fails with [`StreamError::Closed`]. Closing twice is
    /// a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.buffer.take().is_some() {
            tracing::debug!(unread = self.count - self.position, "closing buffered reader");
        }
        self.inner = None;
        self.position = 0;
        self.count = 0;
        Ok(())
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Returns the buffer capacity, or 0 once closed.
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Returns how many unread bytes sit in the window.
    pub fn buffered(&self) -> usize {
        self.count - self.position
    }

    /// Returns the wrapped source, if still open.
    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    /// Unwraps the source. Buffered but unread bytes are lost.
    pub fn into_inner(mut self) -> Result<R> {
        self.inner.take().ok_or(StreamError::Closed {
            component: COMPONENT,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(StreamError::Closed {
                component: COMPONENT,
            });
        }
        Ok(())
    }

    fn parts(&mut self) -> Result<(&mut [u8], &mut R)> {
        match (self.buffer.as_deref_mut(), self.inner.as_mut()) {
            (Some(buffer), Some(inner)) => Ok((buffer, inner)),
            _ => Err(StreamError::Closed {
                component: COMPONENT,
            }),
        }
    }
}

impl<R: Read> Read for BufferedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_all_into(buf)?.unwrap_or(0))
    }
}

impl<R: Read> BufRead for BufferedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.position >= self.count {
            self.fill()?;
        }
        let (position, count) = (self.position, self.count);
        let (buffer, _) = self.parts()?;
        Ok(&buffer[position..count])
    }

    fn consume(&mut self, amt: usize) {
        self.position = (self.position + amt).min(self.count);
    }
}
