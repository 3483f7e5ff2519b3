//! Async I/O support for the in-memory streams.
//!
//! This module implements the runtime-agnostic `futures-io` traits for
//! [`MemoryReader`](crate::MemoryReader) and
//! [`MemoryWriter`](crate::MemoryWriter), so they plug into tokio (through
//! `tokio_util::compat`), async-std, smol, or plain `futures` code. Both are
//! backed by memory and never return `Poll::Pending`.
//!
//! This module requires the `async-io` feature to be enabled.

mod memory;
