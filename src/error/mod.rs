//! Error types for bytestreams.

use std::fmt;
use std::io;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors that can occur while reading from or writing to a stream wrapper.
#[derive(Debug)]
pub enum StreamError {
    /// The underlying source or sink failed. Passed through untouched.
    Io(io::Error),

    /// The wrapper was used after `close()`.
    Closed {
        /// Which wrapper was closed.
        component: &'static str,
    },

    /// An `offset`/`length` pair does not fit the caller's slice.
    InvalidRange {
        /// Length of the caller's slice.
        array_len: usize,
        /// Requested start offset.
        offset: usize,
        /// Requested length.
        len: usize,
    },

    /// A buffer capacity was refused.
    CapacityRejected {
        /// The capacity that was asked for.
        requested: usize,
        /// Why it was refused.
        message: &'static str,
    },
}

impl StreamError {
    /// Returns true if this is a use-after-close error.
    pub fn is_closed(&self) -> bool {
        matches!(self, StreamError::Closed { .. })
    }

    /// Returns true if this is a bounds-check failure.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, StreamError::InvalidRange { .. })
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Io(e) => write!(f, "io error: {}", e),
            StreamError::Closed { component } => {
                write!(f, "{} is closed, use a new one", component)
            }
            StreamError::InvalidRange {
                array_len,
                offset,
                len,
            } => write!(
                f,
                "invalid range: array length = {}, off = {}, len = {}",
                array_len, offset, len
            ),
            StreamError::CapacityRejected { requested, message } => {
                write!(f, "capacity {} rejected: {}", requested, message)
            }
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(e) => e,
            StreamError::Closed { .. } => io::Error::new(io::ErrorKind::NotConnected, e),
            StreamError::InvalidRange { .. } | StreamError::CapacityRejected { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
        }
    }
}
