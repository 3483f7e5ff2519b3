// Shared fixtures for integration tests: sources and sinks that count calls.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

pub const BYTES: &[u8] = b"This is true";

/// Source that returns at most `max_per_call` bytes per read.
pub struct TrickleSource {
    data: Vec<u8>,
    pos: usize,
    max_per_call: usize,
    pub calls: usize,
}

impl TrickleSource {
    pub fn new(data: &[u8], max_per_call: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            max_per_call: max_per_call.max(1),
            calls: 0,
        }
    }
}

impl Read for TrickleSource {
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

#[derive(Debug, Default)]
struct SinkState {
    data: Vec<u8>,
    writes: usize,
    flushes: usize,
    closed: bool,
}

/// Handle onto what a [`CountingSink`] has recorded.
#[derive(Debug, Default, Clone)]
pub struct SinkRecorder(Rc<RefCell<SinkState>>);

impl SinkRecorder {
    pub fn sink(&self) -> CountingSink {
        CountingSink(self.clone())
    }

    pub fn data(&self) -> Vec<u8> {
        self.0.borrow().data.clone()
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub fn flushes(&self) -> usize {
        self.0.borrow().flushes
    }

    pub fn closed(&self) -> bool {
        self.0.borrow().closed
    }
}

/// Sink that counts write calls and marks itself closed when dropped.
pub struct CountingSink(SinkRecorder);

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = (self.0).0.borrow_mut();
        state.data.extend_from_slice(buf);
        state.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        (self.0).0.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Drop for CountingSink {
    fn drop(&mut self) {
        (self.0).0.borrow_mut().closed = true;
    }
}
