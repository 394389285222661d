//! Snapshot differencing engines.
//!
//! `classic` scans a copy-on-write exception store; `thin` diffs the block
//! maps of a thin pool metadata dump. Both resolve to an ordered list of
//! disjoint, chunk-aligned `BlockRange`s. Adjacent ranges are deliberately
//! left uncoalesced.

pub mod classic;
pub mod thin;

use serde::Serialize;

/// An inclusive byte range of the origin LV that differs from the snapshot.
///
/// Always chunk-aligned at the owning LV's chunk size, always
/// `first_byte <= last_byte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BlockRange {
    pub first_byte: u64,
    pub last_byte: u64,
}

impl BlockRange {
    /// Byte range covered by chunk number `block`.
    pub fn from_block(block: u64, chunk_size: u64) -> Self {
        Self {
            first_byte: block * chunk_size,
            last_byte: (block + 1) * chunk_size - 1,
        }
    }

    /// Number of bytes covered (ranges are never empty).
    pub fn byte_count(&self) -> u64 {
        self.last_byte - self.first_byte + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_block_is_inclusive_and_aligned() {
        let r = BlockRange::from_block(3, 4096);
        assert_eq!(r.first_byte, 12288);
        assert_eq!(r.last_byte, 16383);
        assert_eq!(r.byte_count(), 4096);
    }
}
