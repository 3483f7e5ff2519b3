//! Fixed-capacity write buffer over any [`std::io::Write`] sink.
//!
//! [`BufferedWriter`] collects small writes and hands them to the sink in one
//! call when the buffer is full, on [`flush`](BufferedWriter::flush), or on
//! [`close`](BufferedWriter::close). A chunk larger than the free room is
//! never split: the pending bytes are flushed and the chunk goes straight to
//! the sink.

use std::io::{self, Write};

use crate::config::BufferConfig;
use crate::error::{Result, StreamError};
use crate::util::check_write_range;

const COMPONENT: &str = "BufferedWriter";

/// A writer that batches small writes into an underlying sink.
///
/// Invariant: `position <= capacity`, and `buffer[..position]` is pending
/// data the sink has not seen yet.
///
/// Dropping a writer discards any pending bytes without touching the sink;
/// call [`close`](Self::close) or [`flush`](Self::flush) first to keep them.
///
/// # Example
///
/// ```
/// use bytestreams::BufferedWriter;
///
/// let mut writer = BufferedWriter::with_capacity(3, Vec::new())?;
/// writer.write_all_from(b"ab")?;
/// assert_eq!(writer.pending(), 2);
/// assert!(writer.get_ref().unwrap().is_empty());
///
/// let sink = writer.into_inner()?;
/// assert_eq!(sink, b"ab");
/// # Ok::<(), bytestreams::StreamError>(())
/// ```
#[derive(Debug)]
pub struct BufferedWriter<W: Write> {
    inner: Option<W>,
    buffer: Option<Box<[u8]>>,
    position: usize,
}

impl<W: Write> BufferedWriter<W> {
    /// Creates a writer with the default 8 KiB buffer.
    pub fn new(inner: W) -> Self {
        Self::from_parts(BufferConfig::default().capacity(), inner)
    }

    /// Creates a writer with a buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CapacityRejected`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize, inner: W) -> Result<Self> {
        Self::with_config(BufferConfig::new(capacity)?, inner)
    }

    /// Creates a writer sized by `config`.
    pub fn with_config(config: BufferConfig, inner: W) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.capacity(), inner))
    }

    fn from_parts(capacity: usize, inner: W) -> Self {
        Self {
            inner: Some(inner),
            buffer: Some(vec![0u8; capacity].into_boxed_slice()),
            position: 0,
        }
    }

    /// Buffers one byte, flushing first if the buffer is full.
    pub fn write_one(&mut self, byte: u8) -> Result<()> {
        if self.position == self.capacity() {
            self.flush()?;
        }

        let position = self.position;
        let (buffer, _) = self.parts()?;
        buffer[position] = byte;
        self.position += 1;
        Ok(())
    }

    /// Writes `src[offset..offset + length]`.
    ///
    /// If the chunk fits the free room it is copied into the buffer.
    /// Otherwise pending bytes are flushed and the whole chunk is written to
    /// the sink directly, in one call.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if the range does not fit `src` or
    /// `length` is zero, [`StreamError::Closed`] after close, and
    /// [`StreamError::Io`] for sink failures.
    pub fn write_from(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        self.ensure_open()?;
        check_write_range(src.len(), offset, length)?;

        let chunk = &src[offset..offset + length];
        if length > self.capacity() - self.position {
            self.flush()?;
            let (_, inner) = self.parts()?;
            inner.write_all(chunk)?;
            tracing::trace!(length, "bypassed write buffer");
        } else {
            let position = self.position;
            let (buffer, _) = self.parts()?;
            buffer[position..position + length].copy_from_slice(chunk);
            self.position += length;
        }
        Ok(())
    }

    /// Shorthand for `write_from(src, 0, src.len())`.
    pub fn write_all_from(&mut self, src: &[u8]) -> Result<()> {
        self.write_from(src, 0, src.len())
    }

    /// Hands pending bytes to the sink in one call.
    ///
    /// Does nothing when no bytes are pending. This does not flush the sink
    /// itself; [`Write::flush`] does both.
    pub fn flush(&mut self) -> Result<()> {
        let position = self.position;
        let (buffer, inner) = self.parts()?;
        if position != 0 {
            inner.write_all(&buffer[..position])?;
            tracing::trace!(bytes = position, "flushed write buffer");
        }
        self.position = 0;
        Ok(())
    }

    /// Flushes pending bytes, releases the buffer, then flushes and drops the sink.
    ///
    /// Every later write or flush fails with [`StreamError::Closed`]. Closing
    /// twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        if self.position != 0 {
            self.flush()?;
        }

        tracing::debug!("closing buffered writer");
        self.buffer = None;
        if let Some(mut inner) = self.inner.take() {
            inner.flush()?;
        }
        Ok(())
    }

    /// Flushes pending bytes and returns the sink without closing it.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.buffer = None;
        self.inner.take().ok_or(StreamError::Closed {
            component: COMPONENT,
        })
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Returns the buffer capacity, or 0 once closed.
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Returns how many bytes are waiting to be flushed.
    pub fn pending(&self) -> usize {
        self.position
    }

    /// Returns the wrapped sink, if still open.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(StreamError::Closed {
                component: COMPONENT,
            });
        }
        Ok(())
    }

    fn parts(&mut self) -> Result<(&mut [u8], &mut W)> {
        match (self.buffer.as_deref_mut(), self.inner.as_mut()) {
            (Some(buffer), Some(inner)) => Ok((buffer, inner)),
            _ => Err(StreamError::Closed {
                component: COMPONENT,
            }),
        }
    }
}

impl<W: Write> Write for BufferedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        if buf.is_empty() {
            return Ok(0);
        }
        self.write_all_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        BufferedWriter::flush(self)?;
        let (_, inner) = self.parts()?;
        inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FailingSink, SinkLog};

    const BYTES: &[u8] = b"This is true";

    #[test]
    fn test_write_one_flushes_when_full() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(3, log.sink()).unwrap();

        for (i, &b) in BYTES.iter().enumerate() {
            w.write_one(b).unwrap();
            if i == 2 {
                assert!(log.data().is_empty());
            }
            if i == 3 {
                assert_eq!(log.data(), b"Thi");
                assert_eq!(log.writes(), 1);
            }
        }

        // 12 bytes through a 3-byte buffer: three full flushes, one pending.
        assert_eq!(log.data(), b"This is t");
        w.close().unwrap();
        assert_eq!(log.data(), BYTES);
        assert!(log.closed());
    }

    #[test]
    fn test_write_from_fits_buffer() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(8, log.sink()).unwrap();
        w.write_from(BYTES, 0, 4).unwrap();
        w.write_from(BYTES, 4, 4).unwrap();
        assert_eq!(log.writes(), 0);
        assert_eq!(w.pending(), 8);

        w.flush().unwrap();
        assert_eq!(log.writes(), 1);
        assert_eq!(log.data(), b"This is ");
    }

    #[test]
    fn test_oversized_write_flushes_then_bypasses() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(4, log.sink()).unwrap();
        w.write_from(BYTES, 0, 2).unwrap();
        w.write_from(BYTES, 2, 10).unwrap();

        assert_eq!(log.writes(), 2);
        assert_eq!(log.data(), BYTES);
        assert_eq!(w.pending(), 0);
    }

    #[test]
    fn test_oversized_write_with_nothing_pending() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(4, log.sink()).unwrap();
        w.write_all_from(BYTES).unwrap();
        assert_eq!(log.writes(), 1);
        assert_eq!(log.data(), BYTES);
    }

    #[test]
    fn test_flush_twice_writes_once() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(16, log.sink()).unwrap();
        w.write_all_from(b"abc").unwrap();
        w.flush().unwrap();
        w.flush().unwrap();
        assert_eq!(log.writes(), 1);
    }

    #[test]
    fn test_invalid_range_leaves_state() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(16, log.sink()).unwrap();
        w.write_one(b'x').unwrap();

        for (off, len) in [(0, 0), (13, 1), (0, 13), (6, 7), (usize::MAX, 2)] {
            assert!(w.write_from(BYTES, off, len).unwrap_err().is_invalid_range());
        }
        assert_eq!(w.pending(), 1);
        assert_eq!(log.writes(), 0);
    }

    #[test]
    fn test_closed_writer_fails() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(16, log.sink()).unwrap();
        w.write_all_from(b"abc").unwrap();
        w.close().unwrap();

        assert_eq!(log.data(), b"abc");
        assert_eq!(log.flushes(), 1);
        assert!(log.closed());
        assert!(w.write_one(b'x').unwrap_err().is_closed());
        assert!(w.write_all_from(b"x").unwrap_err().is_closed());
        assert!(w.flush().unwrap_err().is_closed());
        assert!(w.close().is_ok());
    }

    #[test]
    fn test_std_write_flushes_sink() {
        let log = SinkLog::default();
        let mut w = BufferedWriter::with_capacity(16, log.sink()).unwrap();
        write!(w, "n={}", 42).unwrap();
        Write::flush(&mut w).unwrap();
        assert_eq!(log.data(), b"n=42");
        assert_eq!(log.flushes(), 1);
    }

    #[test]
    fn test_drop_discards_pending() {
        let log = SinkLog::default();
        {
            let mut w = BufferedWriter::with_capacity(16, log.sink()).unwrap();
            w.write_all_from(b"late").unwrap();
        }
        assert!(log.data().is_empty());
        assert_eq!(log.writes(), 0);
        assert!(log.closed());
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut w = BufferedWriter::with_capacity(2, FailingSink).unwrap();
        w.write_one(b'a').unwrap();
        w.write_one(b'b').unwrap();
        match w.write_one(b'c').unwrap_err() {
            StreamError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(w.pending(), 2);
    }
}
