//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

use crate::error::{Result, StreamError};

/// Checks that `offset..offset + len` lies inside a slice of `array_len` bytes.
///
/// Rejects `offset > array_len`, `len > array_len` and an end past
/// `array_len` (including an end that overflows `usize`). A zero `len` passes;
/// callers that forbid empty writes check that themselves.
pub(crate) fn check_range(array_len: usize, offset: usize, len: usize) -> Result<()> {
    let fits = offset <= array_len
        && len <= array_len
        && offset.checked_add(len).is_some_and(|end| end <= array_len);

    if fits {
        Ok(())
    } else {
        Err(StreamError::InvalidRange {
            array_len,
            offset,
            len,
        })
    }
}

/// Like [`check_range`], but an empty region is also invalid.
pub(crate) fn check_write_range(array_len: usize, offset: usize, len: usize) -> Result<()> {
    if len == 0 {
        return Err(StreamError::InvalidRange {
            array_len,
            offset,
            len,
        });
    }
    check_range(array_len, offset, len)
}
