use std::fmt;

use crate::hasher::LineHasher;
use crate::line::LineHashSequence;

/// Fingerprint of a window of consecutive line hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Create a block hash from a pre-computed digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.short_hex())
    }
}

/// Per-line fingerprints of the window `[line - radius, line + radius]`.
///
/// A line only has a block hash when its whole window lies inside the file,
/// so the first and last `radius` lines never have one. A larger radius gives
/// stronger evidence per line at the cost of a narrower usable range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHashSequence {
    radius: usize,
    blocks: Vec<Option<BlockHash>>,
}

impl BlockHashSequence {
    /// Compute block hashes for every line of `lines`.
    pub fn new(lines: &LineHashSequence, radius: usize) -> Self {
        let hashes = lines.hashes();
        let width = radius.saturating_mul(2).saturating_add(1);
        let blocks = (0..hashes.len())
            .map(|index| {
                let start = index.checked_sub(radius)?;
                let window = hashes.get(start..start.checked_add(width)?)?;
                Some(LineHasher::block_hash(window.iter().map(String::as_str)))
            })
            .collect();
        Self { radius, blocks }
    }

    /// The window radius this sequence was built with.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of lines covered (with or without a block hash).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block hash centred on `line`, if its window is fully in range.
    pub fn block_hash_for_line(&self, line: u32) -> Option<BlockHash> {
        let index = (line as usize).checked_sub(1)?;
        self.blocks.get(index).copied().flatten()
    }

    /// Returns `true` if `line` has a block hash.
    pub fn has_block_hash(&self, line: u32) -> bool {
        self.block_hash_for_line(line).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seq(hashes: &[&str]) -> LineHashSequence {
        LineHashSequence::from_hashes(hashes.iter().copied())
    }

    #[test]
    fn radius_zero_covers_every_line() {
        let blocks = BlockHashSequence::new(&seq(&["a", "b", "a"]), 0);
        assert!((1..=3).all(|line| blocks.has_block_hash(line)));
        assert_eq!(blocks.block_hash_for_line(1), blocks.block_hash_for_line(3));
        assert_ne!(blocks.block_hash_for_line(1), blocks.block_hash_for_line(2));
    }

    #[test]
    fn edges_have_no_block_hash() {
        let blocks = BlockHashSequence::new(&seq(&["a", "b", "c", "d", "e"]), 1);
        assert!(!blocks.has_block_hash(1));
        assert!(blocks.has_block_hash(2));
        assert!(blocks.has_block_hash(4));
        assert!(!blocks.has_block_hash(5));
        assert!(!blocks.has_block_hash(0));
        assert!(!blocks.has_block_hash(6));
    }

    #[test]
    fn same_window_same_hash_across_files() {
        let old = seq(&["x", "a", "b", "c", "y"]);
        let new = seq(&["p", "q", "r", "a", "b", "c", "z"]);
        let old_blocks = BlockHashSequence::new(&old, 1);
        let new_blocks = BlockHashSequence::new(&new, 1);
        assert_eq!(
            old_blocks.block_hash_for_line(3),
            new_blocks.block_hash_for_line(5)
        );
        assert_ne!(
            old_blocks.block_hash_for_line(2),
            new_blocks.block_hash_for_line(4)
        );
    }

    #[test]
    fn file_shorter_than_window_has_no_block_hashes() {
        let blocks = BlockHashSequence::new(&seq(&["a", "b", "c"]), 2);
        assert_eq!(blocks.len(), 3);
        assert!((1..=3).all(|line| !blocks.has_block_hash(line)));
    }

    proptest! {
        #[test]
        fn block_hash_defined_iff_window_in_range(len in 0usize..40, radius in 0usize..5) {
            let hashes: Vec<String> = (0..len).map(|i| format!("h{}", i % 3)).collect();
            let blocks = BlockHashSequence::new(&LineHashSequence::from_hashes(hashes), radius);
            for line in 1..=len {
                let in_range = line > radius && line + radius <= len;
                prop_assert_eq!(blocks.has_block_hash(line as u32), in_range);
            }
        }
    }
}
