//! bytestreams
//!
//! Byte-stream I/O wrappers with predictable buffering.
//!
//! `bytestreams` provides four small, independent building blocks:
//!
//! - [`BufferedReader`] - fixed-capacity read buffer over any [`std::io::Read`]
//! - [`BufferedWriter`] - fixed-capacity write buffer over any [`std::io::Write`]
//! - [`MemoryReader`] - cursor over a fixed, immutable byte region
//! - [`MemoryWriter`] - appendable buffer that grows by `floor(cap * 1.5) + 1`
//!
//! The crate intentionally:
//! - does NOT open files or sockets
//! - does NOT manage concurrency
//! - does NOT transform, encode or compress bytes
//! - does NOT retry short reads or failed writes
//!
//! Each wrapper exposes explicit `offset`/`length` operations that report
//! end of stream as `Ok(None)` and range mistakes as
//! [`StreamError::InvalidRange`], and also implements the std I/O traits so
//! the wrappers compose with each other and with the rest of the ecosystem.
//! After `close()` every operation fails with [`StreamError::Closed`].
//!
//! # Sync
//!
//! ```
//! use bytestreams::{BufferedReader, BufferedWriter, MemoryReader, MemoryWriter};
//!
//! // Batch small writes into a growable in-memory sink.
//! let mut writer = BufferedWriter::with_capacity(4, MemoryWriter::with_capacity(2))?;
//! for &b in b"This is true" {
//!     writer.write_one(b)?;
//! }
//! let sink = writer.into_inner()?;
//! assert_eq!(sink.to_vec()?, b"This is true");
//!
//! // Read it back one byte at a time.
//! let mut reader = BufferedReader::with_capacity(5, MemoryReader::new(sink.to_bytes()?))?;
//! let mut out = Vec::new();
//! while let Some(b) = reader.read_one()? {
//!     out.push(b);
//! }
//! assert_eq!(out, b"This is true");
//! # Ok::<(), bytestreams::StreamError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::io::AsyncReadExt;
//! use bytestreams::MemoryReader;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let mut reader = MemoryReader::new(&b"payload"[..]);
//!     let mut out = Vec::new();
//!     reader.read_to_end(&mut out).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffered;
mod config;
mod error;
mod memory;

mod util; // internal range checks

#[cfg(feature = "async-io")]
mod async_io;

#[cfg(test)]
mod test_utils;

//
// Public surface
//

pub use buffered::{BufferedReader, BufferedWriter};
pub use config::{BufferConfig, DEFAULT_CAPACITY, next_capacity};
pub use error::{Result, StreamError};
pub use memory::{MemoryReader, MemoryWriter};
