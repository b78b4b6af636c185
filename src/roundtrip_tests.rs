//! End-to-end encode/decode properties over the public archive entry
//! points. Bulk test data comes from a hash-derived generator so every run
//! sees the same "random" bytes without a dependency on an RNG crate.

use crate::archive::{decode, encode};
use crate::assert_bytes_eq;
use crate::error::HuffzyError;
use crate::format::HEADER_SIZE;
use crate::freq::NUM_SYMBOLS;

fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    (0..len)
        .map(|i| {
            let mut hasher = DefaultHasher::new();
            (seed, i).hash(&mut hasher);
            (hasher.finish() & 0xff) as u8
        })
        .collect()
}

fn roundtrip(data: &[u8]) {
    let mut archived = Vec::new();
    let enc = encode(data, &mut archived).unwrap();

    let mut restored = Vec::new();
    let dec = decode(&archived[..], &mut restored).unwrap();

    assert_bytes_eq!(restored, data, "decode(encode(data))");
    assert_eq!(enc.symbols_in, data.len() as u64);
    assert_eq!(enc.bytes_out, archived.len() as u64);
    assert_eq!(dec.bytes_in, archived.len() as u64);
    assert_eq!(dec.bytes_out, data.len() as u64);
}

#[test]
fn roundtrip_empty() {
    roundtrip(&[]);
}

#[test]
fn roundtrip_single_byte() {
    roundtrip(b"A");
}

#[test]
fn roundtrip_single_repeated_symbol() {
    // Degenerate distribution: one byte value carries every count
    roundtrip(&[0x5a; 4096]);
}

#[test]
fn roundtrip_two_symbols() {
    let data: Vec<u8> = (0..1000).map(|i| if i % 3 == 0 { b'x' } else { b'y' }).collect();
    roundtrip(&data);
}

#[test]
fn roundtrip_text() {
    roundtrip(b"it was the best of times, it was the worst of times");
}

#[test]
fn roundtrip_every_byte_value() {
    let data: Vec<u8> = (0..NUM_SYMBOLS).map(|i| i as u8).collect();
    roundtrip(&data);
}

#[test]
fn roundtrip_skewed_distribution() {
    // Exponentially decaying frequencies push some codewords deep
    let mut data = Vec::new();
    for i in 0..20u32 {
        data.extend(std::iter::repeat(i as u8).take(1 << (20 - i)));
    }
    roundtrip(&data);
}

#[test]
fn roundtrip_100k_pseudorandom() {
    roundtrip(&pseudo_random_bytes(0x5eed, 100_000));
}

#[test]
fn identical_input_produces_identical_archives() {
    let data = pseudo_random_bytes(7, 10_000);

    let mut first = Vec::new();
    encode(&data, &mut first).unwrap();
    let mut second = Vec::new();
    encode(&data, &mut second).unwrap();

    assert_bytes_eq!(first, second, "archives of identical input");
}

#[test]
fn empty_input_archive_is_exactly_one_header() {
    let mut archived = Vec::new();
    let enc = encode(&[], &mut archived).unwrap();
    assert_eq!(archived.len(), HEADER_SIZE);
    assert_eq!(enc.symbols_in, 0);
    assert_eq!(&archived[..8], &[0u8; 8]);

    let mut restored = Vec::new();
    let dec = decode(&archived[..], &mut restored).unwrap();
    assert!(restored.is_empty());
    assert_eq!(dec.bytes_out, 0);
}

#[test]
fn streams_shorter_than_header_are_malformed() {
    for len in [0usize, 7, 8, 1000, HEADER_SIZE - 1] {
        let stub = pseudo_random_bytes(len as u64, len);
        let mut sink = Vec::new();
        assert!(
            matches!(
                decode(&stub[..], &mut sink),
                Err(HuffzyError::MalformedHeader(_))
            ),
            "{}-byte stream should fail as malformed",
            len
        );
    }
}

#[test]
fn compression_actually_compresses_skewed_text() {
    // 64k of a two-symbol alphabet must come out well under one byte per
    // symbol once the fixed header is paid for
    let data: Vec<u8> = (0..65536).map(|i| if i % 7 == 0 { b'!' } else { b'.' }).collect();
    let mut archived = Vec::new();
    let enc = encode(&data, &mut archived).unwrap();
    assert!(enc.bytes_out < HEADER_SIZE as u64 + data.len() as u64 / 2);
}
