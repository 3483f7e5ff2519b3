//! Fixed-capacity buffers over an external source or sink.
//!
//! - [`BufferedReader`] - Amortizes small reads against a [`std::io::Read`]
//! - [`BufferedWriter`] - Batches small writes into a [`std::io::Write`]

mod reader;
mod writer;

pub use reader::BufferedReader;
pub use writer::BufferedWriter;
