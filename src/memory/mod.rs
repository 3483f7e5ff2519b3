//! In-memory byte streams.
//!
//! - [`MemoryReader`] - Cursor over a fixed, immutable byte region
//! - [`MemoryWriter`] - Appendable buffer with `floor(cap * 1.5) + 1` growth

mod reader;
mod writer;

pub use reader::MemoryReader;
pub use writer::MemoryWriter;
