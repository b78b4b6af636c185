//! End-to-end encode and decode over the on-disk archive layout.
//!
//! Encode expects its input fully buffered (the drivers hand it an mmap or
//! an in-memory buffer) because the stream is walked twice: once to count
//! frequencies, once to emit codewords. With the whole input in hand the
//! original length is known up front, so the header goes out in a single
//! forward pass, with no reserve-and-patch seeking.
//!
//! Decode streams: it reads the fixed header, rebuilds the code table from
//! the frequencies exactly the way the encoder built it, reconstructs an
//! equivalent tree from those codes, then walks bits until the recorded
//! symbol count is satisfied. Trailing pad bits are never even requested.

use std::io::{self, Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HuffzyError, HuffzyResult};
use crate::format::{HEADER_SIZE, SYMBOL_COUNT_SIZE};
use crate::freq::Frequencies;
use crate::tree::HuffmanTree;

/// What an encode call did: symbols consumed and archive bytes produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    pub symbols_in: u64,
    pub bytes_out: u64,
}

/// What a decode call did: archive bytes consumed and symbols produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Compress `data` into `out`. Identical input always produces identical
/// archive bytes: the tree tie-break is deterministic, so the code table
/// and the bit stream are too.
pub fn encode<W: Write>(data: &[u8], mut out: W) -> HuffzyResult<EncodeStats> {
    let mut frequencies = Frequencies::new();
    frequencies.count(data);

    let tree = HuffmanTree::from_frequencies(&frequencies);
    let codes = tree.compute_codes();

    out.write_all(&(data.len() as u64).to_le_bytes())?;
    frequencies.save(&mut out)?;

    let mut writer = BitWriter::new(&mut out);
    for &byte in data {
        writer.write(&codes[byte])?;
    }
    writer.flush()?;

    Ok(EncodeStats {
        symbols_in: data.len() as u64,
        bytes_out: HEADER_SIZE as u64 + writer.bytes_written(),
    })
}

/// Decompress an archive from `input` into `out`, stopping after exactly
/// the recorded number of symbols.
pub fn decode<R: Read, W: Write>(mut input: R, mut out: W) -> HuffzyResult<DecodeStats> {
    let symbols = read_symbol_count(&mut input)?;
    let frequencies = Frequencies::load(&mut input)?;

    if frequencies.total() != symbols {
        return Err(HuffzyError::malformed_header(
            "symbol count disagrees with frequency table",
        ));
    }

    // Same deterministic build as the encoder, then a top-down rebuild from
    // the codes; the two trees carry identical prefix relationships.
    let codes = HuffmanTree::from_frequencies(&frequencies).compute_codes();
    let tree = HuffmanTree::from_codes(&codes)?;
    let mut walker = tree.walker();

    let mut reader = BitReader::new(&mut input);
    let mut produced: u64 = 0;

    while produced < symbols {
        let bit = reader.read_bit()?.ok_or_else(|| {
            HuffzyError::truncated(format!(
                "payload ended after {} of {} symbols",
                produced, symbols
            ))
        })?;

        walker.step(bit);
        if walker.is_leaf() {
            out.write_all(&[walker.byte()])?;
            produced += 1;
        }
    }

    Ok(DecodeStats {
        bytes_in: HEADER_SIZE as u64 + reader.bytes_read(),
        bytes_out: produced,
    })
}

/// Read just the leading original-length field. Used by decode and by the
/// listing mode, which inspects archives without expanding them.
pub fn read_symbol_count<R: Read>(mut input: R) -> HuffzyResult<u64> {
    let mut raw = [0u8; SYMBOL_COUNT_SIZE];
    input.read_exact(&mut raw).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HuffzyError::malformed_header("missing original-length field")
        } else {
            HuffzyError::Io(e)
        }
    })?;
    Ok(u64::from_le_bytes(raw))
}
