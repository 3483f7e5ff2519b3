//! Instrumented sources and sinks for unit tests.

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// A source that hands out at most `max_per_call` bytes per `read` and counts calls.
pub(crate) struct ChunkedSource {
    data: Vec<u8>,
    pos: usize,
    max_per_call: usize,
    pub(crate) calls: usize,
}

impl ChunkedSource {
    pub(crate) fn new(data: &[u8], max_per_call: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            max_per_call,
            calls: 0,
        }
    }
}

impl Read for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf
            .len()
            .min(self.max_per_call)
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A source whose every read fails.
pub(crate) struct FailingSource;

impl Read for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "source failed"))
    }
}

/// A source that returns `data` on the first read and fails on every later one.
pub(crate) struct FailsAfterFirstRead {
    data: Option<Vec<u8>>,
}

impl FailsAfterFirstRead {
    pub(crate) fn new(data: &[u8]) -> Self {
        Self {
            data: Some(data.to_vec()),
        }
    }
}

impl Read for FailsAfterFirstRead {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self
            .data
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Interrupted, "source interrupted"))?;
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SinkState {
    pub(crate) data: Vec<u8>,
    pub(crate) writes: usize,
    pub(crate) flushes: usize,
    pub(crate) closed: bool,
}

/// Shared view of what a [`RecordingSink`] has seen, readable after the sink moved.
#[derive(Debug, Default, Clone)]
pub(crate) struct SinkLog(Rc<RefCell<SinkState>>);

impl SinkLog {
    pub(crate) fn sink(&self) -> RecordingSink {
        RecordingSink { log: self.clone() }
    }

    pub(crate) fn data(&self) -> Vec<u8> {
        self.0.borrow().data.clone()
    }

    pub(crate) fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub(crate) fn flushes(&self) -> usize {
        self.0.borrow().flushes
    }

    pub(crate) fn closed(&self) -> bool {
        self.0.borrow().closed
    }
}

/// A sink that records every write call; dropping it marks the log closed.
pub(crate) struct RecordingSink {
    log: SinkLog,
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.log.0.borrow_mut();
        state.data.extend_from_slice(buf);
        state.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.0.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        self.log.0.borrow_mut().closed = true;
    }
}

/// A sink whose every write fails.
pub(crate) struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink failed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
