//! Per-byte frequency counting and its fixed-size serialized form.

use std::io::{self, Read, Write};
use std::ops::{Index, IndexMut};

use crate::error::{HuffzyError, HuffzyResult};

/// Number of distinct byte values.
pub const NUM_SYMBOLS: usize = 256;

/// Occurrence counts for every possible byte value.
///
/// Serialized as 256 fixed-width little-endian u64s in ascending byte-value
/// order; `load` is the exact inverse of `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [u64; NUM_SYMBOLS],
}

impl Frequencies {
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SYMBOLS],
        }
    }

    /// Tally every byte of `data`.
    pub fn count(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Write all 256 counts as the frequency-table header block.
    pub fn save<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut block = [0u8; NUM_SYMBOLS * 8];
        for (i, &count) in self.counts.iter().enumerate() {
            block[i * 8..(i + 1) * 8].copy_from_slice(&count.to_le_bytes());
        }
        out.write_all(&block)
    }

    /// Read the frequency-table block back. A short read is reported as a
    /// malformed header rather than a generic IO failure.
    pub fn load<R: Read>(mut input: R) -> HuffzyResult<Self> {
        let mut block = [0u8; NUM_SYMBOLS * 8];
        input.read_exact(&mut block).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                HuffzyError::malformed_header("frequency table cut short")
            } else {
                HuffzyError::Io(e)
            }
        })?;

        let mut counts = [0u64; NUM_SYMBOLS];
        for (i, count) in counts.iter_mut().enumerate() {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&block[i * 8..(i + 1) * 8]);
            *count = u64::from_le_bytes(raw);
        }
        Ok(Self { counts })
    }

    /// Total number of symbols counted. Saturating, since a crafted header
    /// block can hold counts that sum past u64.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }
}

impl Default for Frequencies {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for Frequencies {
    type Output = u64;

    fn index(&self, byte: u8) -> &u64 {
        &self.counts[byte as usize]
    }
}

impl IndexMut<u8> for Frequencies {
    fn index_mut(&mut self, byte: u8) -> &mut u64 {
        &mut self.counts[byte as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_byte_value() {
        // i occurrences of byte value i
        let mut data = Vec::new();
        for i in 0..NUM_SYMBOLS {
            data.extend(std::iter::repeat(i as u8).take(i));
        }

        let mut freq = Frequencies::new();
        freq.count(&data);

        for i in 0..NUM_SYMBOLS {
            assert_eq!(freq[i as u8], i as u64);
        }
        assert_eq!(freq.total(), data.len() as u64);
    }

    #[test]
    fn save_load_identity() {
        let mut freq = Frequencies::new();
        for i in 0..NUM_SYMBOLS {
            freq[i as u8] = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 16;
        }

        let mut block = Vec::new();
        freq.save(&mut block).unwrap();
        assert_eq!(block.len(), NUM_SYMBOLS * 8);

        let loaded = Frequencies::load(&block[..]).unwrap();
        assert_eq!(loaded, freq);
    }

    #[test]
    fn load_rejects_short_block() {
        let block = vec![0u8; 100];
        match Frequencies::load(&block[..]) {
            Err(HuffzyError::MalformedHeader(_)) => {}
            other => panic!("expected MalformedHeader, got {:?}", other.map(|_| ())),
        }
    }
}
