//! `futures-io` impls for the in-memory streams.
//!
//! # Example
//!
//! ```ignore
//! use bytestreams::{MemoryReader, MemoryWriter};
//! use futures_util::io::AsyncWriteExt;
//!
//! async fn copy() -> std::io::Result<()> {
//!     let mut reader = MemoryReader::new(&b"payload"[..]);
//!     let mut writer = MemoryWriter::with_capacity(2);
//!
//!     futures_util::io::copy(&mut reader, &mut writer).await?;
//!     AsyncWriteExt::close(&mut writer).await?;
//!     Ok(())
//! }
//! ```

use std::io::{self, BufRead, Read, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::{AsyncBufRead, AsyncRead, AsyncWrite};

use crate::memory::{MemoryReader, MemoryWriter};

impl AsyncRead for MemoryReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Read::read(self.get_mut(), buf))
    }
}

impl AsyncBufRead for MemoryReader {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Poll::Ready(BufRead::fill_buf(self.get_mut()))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        BufRead::consume(self.get_mut(), amt)
    }
}

impl AsyncWrite for MemoryWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Write::write(self.get_mut(), buf))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Write::flush(self.get_mut()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(MemoryWriter::close(self.get_mut()).map_err(io::Error::from))
    }
}
