#![no_main]

use libfuzzer_sys::fuzz_target;
use bytestreams::{BufferedReader, BufferedWriter, MemoryReader, MemoryWriter};

fuzz_target!(|data: &[u8]| {
    // First byte picks the buffer sizes, the rest is the payload.
    let Some((&knob, payload)) = data.split_first() else {
        return;
    };
    let write_cap = (knob & 0x0f) as usize + 1;
    let read_cap = (knob >> 4) as usize + 1;

    // Write through a small buffer into a growable sink, using the payload
    // bytes themselves to choose chunk boundaries.
    let mut writer =
        BufferedWriter::with_capacity(write_cap, MemoryWriter::with_capacity(0)).unwrap();
    let mut rest = payload;
    while !rest.is_empty() {
        let n = (rest[0] as usize % 17 + 1).min(rest.len());
        let (head, tail) = rest.split_at(n);
        if n == 1 {
            writer.write_one(head[0]).unwrap();
        } else {
            writer.write_all_from(head).unwrap();
        }
        assert!(writer.pending() <= write_cap);
        rest = tail;
    }
    let sink = writer.into_inner().unwrap();
    assert_eq!(sink.to_vec().unwrap(), payload);
    assert!(sink.len() <= sink.capacity());

    // Read it back with mixed single and bulk reads.
    let source = MemoryReader::new(sink.to_bytes().unwrap());
    let mut reader = BufferedReader::with_capacity(read_cap, source).unwrap();
    let mut out = Vec::with_capacity(payload.len());
    let mut dest = [0u8; 13];
    loop {
        if out.len() % 2 == 0 {
            match reader.read_one().unwrap() {
                Some(b) => out.push(b),
                None => break,
            }
        } else {
            match reader.read_all_into(&mut dest).unwrap() {
                Some(n) => out.extend_from_slice(&dest[..n]),
                None => break,
            }
        }
    }
    assert_eq!(out, payload);
    assert_eq!(reader.read_one().unwrap(), None);
});
