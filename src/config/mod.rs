//! Configuration for buffer sizing.
//!
//! - [`BufferConfig`] - Capacity of the fixed buffers used by
//!   [`BufferedReader`](crate::BufferedReader) and
//!   [`BufferedWriter`](crate::BufferedWriter)
//!
//! # Example
//!
//! ```
//! use bytestreams::BufferConfig;
//!
//! let config = BufferConfig::new(64 * 1024)?;
//! assert_eq!(config.capacity(), 65536);
//!
//! // Default is 8 KiB
//! assert_eq!(BufferConfig::default().capacity(), 8192);
//! # Ok::<(), bytestreams::StreamError>(())
//! ```

use crate::error::{Result, StreamError};

/// Default buffer capacity (8 KiB).
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Returns the capacity a growable buffer moves to when `old` is exhausted.
///
/// This is `floor(old * 1.5) + 1`, computed in integers. Returns `None` if the
/// result does not fit in `usize`.
///
/// ```
/// use bytestreams::next_capacity;
///
/// assert_eq!(next_capacity(0), Some(1));
/// assert_eq!(next_capacity(2), Some(4));
/// assert_eq!(next_capacity(4), Some(7));
/// assert_eq!(next_capacity(7), Some(11));
/// ```
pub const fn next_capacity(old: usize) -> Option<usize> {
    match old.checked_add(old / 2) {
        Some(grown) => grown.checked_add(1),
        None => None,
    }
}

/// Configuration for a fixed-capacity buffer.
///
/// The capacity must be non-zero: a zero-sized window could never hold the
/// byte a single-byte read or write needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    /// Buffer capacity in bytes.
    capacity: usize,
}

impl BufferConfig {
    /// Creates a configuration with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CapacityRejected`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use bytestreams::BufferConfig;
    ///
    /// assert!(BufferConfig::new(0).is_err());
    /// assert_eq!(BufferConfig::new(3).unwrap().capacity(), 3);
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StreamError::CapacityRejected {
                requested: capacity,
                message: "buffer capacity must be non-zero",
            });
        }

        Ok(Self { capacity })
    }

    /// Sets the capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`BufferConfig::validate`] to check it.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use bytestreams::BufferConfig;
    ///
    /// let config = BufferConfig::default().with_capacity(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        Self::new(self.capacity).map(|_| ())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
