//! Writes a payload through a small write buffer, then reads it back.
//!
//! Run with:
//!     cargo run --example round_trip

use std::io::Write;

use bytestreams::{BufferedReader, BufferedWriter, MemoryReader, MemoryWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload = b"This is true. ".repeat(1000);

    println!("Writing {} bytes through a 64-byte buffer...\n", payload.len());

    let mut writer = BufferedWriter::with_capacity(64, MemoryWriter::with_capacity(2))?;

    // Mix tiny writes and oversized ones
    for (i, chunk) in payload.chunks(97).enumerate() {
        if i % 2 == 0 {
            for &b in chunk {
                writer.write_one(b)?;
            }
        } else {
            writer.write_all(chunk)?;
        }
    }

    let memory = writer.into_inner()?;
    println!(
        "Memory writer holds {} bytes in {} bytes of storage",
        memory.len(),
        memory.capacity()
    );

    let mut reader = BufferedReader::with_capacity(256, MemoryReader::new(memory.to_bytes()?))?;
    let mut dest = [0u8; 500];
    let mut total = 0;
    let mut reads = 0;
    while let Some(n) = reader.read_all_into(&mut dest)? {
        total += n;
        reads += 1;
    }

    println!("Read {} bytes back in {} bulk reads", total, reads);
    assert_eq!(total, payload.len());

    Ok(())
}
