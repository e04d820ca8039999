//! Block-granular compaction
//!
//! The disk is a flat, fixed-length array of block owners. Compaction moves
//! the rightmost owned block into the leftmost free slot until the two scan
//! positions meet, packing every owned block into the lowest indices. Files
//! do not stay contiguous under this policy.

use crate::checksum;
use crate::compactor::Compactor;
use crate::dense_map::{DenseMap, Run};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Owner of a single block: one file, or nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Free,
    File(u32),
}

impl Slot {
    pub fn is_free(&self) -> bool {
        matches!(self, Slot::Free)
    }
}

/// Flat block-owner representation of the disk.
///
/// The slot count is fixed at construction; compaction only swaps slot
/// contents, it never grows or shrinks the array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDisk {
    slots: Vec<Slot>,
}

impl BlockDisk {
    /// Expand a dense map into the flat block-owner array.
    pub fn from_dense_map(map: &DenseMap) -> Self {
        let mut slots = Vec::with_capacity(map.total_blocks());

        for run in map.runs() {
            match run {
                Run::File { id, len } => slots.extend(std::iter::repeat(Slot::File(id)).take(len)),
                Run::Free { len } => slots.extend(std::iter::repeat(Slot::Free).take(len)),
            }
        }

        BlockDisk { slots }
    }

    /// Current slot contents, in platter order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Index of the first free slot at or after `from`.
    fn next_free_index(&self, from: usize) -> Option<usize> {
        self.slots[from..]
            .iter()
            .position(Slot::is_free)
            .map(|offset| from + offset)
    }

    /// Index of the last owned slot at or before `from`.
    fn next_file_index(&self, from: usize) -> Option<usize> {
        self.slots[..=from].iter().rposition(|slot| !slot.is_free())
    }
}

impl Compactor for BlockDisk {
    fn compact(&mut self) {
        if self.slots.is_empty() {
            return;
        }

        // Both scan positions are monotone: the free scan only moves right,
        // the owned scan only moves left, so each block is visited once.
        let mut free_from = 0;
        let mut file_from = self.slots.len() - 1;
        let mut moves = 0usize;

        loop {
            let (free_index, file_index) =
                match (self.next_free_index(free_from), self.next_file_index(file_from)) {
                    (Some(free), Some(file)) => (free, file),
                    _ => break,
                };

            if free_index >= file_index {
                break;
            }

            self.slots[free_index] = self.slots[file_index];
            self.slots[file_index] = Slot::Free;
            moves += 1;

            free_from = free_index + 1;
            file_from = file_index - 1;
        }

        debug!("block compaction converged after {} moves", moves);
    }

    fn checksum(&self) -> u64 {
        checksum::slots(&self.slots)
    }

    fn total_blocks(&self) -> usize {
        self.slots.len()
    }

    fn free_blocks(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_free()).count()
    }
}

impl fmt::Display for BlockDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Slot::Free => write!(f, ".")?,
                Slot::File(id) => write!(f, "{id}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(map: &str) -> BlockDisk {
        BlockDisk::from_dense_map(&DenseMap::parse(map).unwrap())
    }

    #[test]
    fn test_decode_layout() {
        let disk = disk("12345");
        assert_eq!(disk.to_string(), "0..111....22222");
        assert_eq!(disk.total_blocks(), 15);
        assert_eq!(disk.free_blocks(), 6);
    }

    #[test]
    fn test_compact_packs_left() {
        let mut disk = disk("12345");
        disk.compact();
        assert_eq!(disk.to_string(), "022111222......");
    }

    #[test]
    fn test_compact_example_checksum() {
        let mut disk = disk("2333133121414131402");
        disk.compact();
        assert_eq!(disk.checksum(), 1928);
    }

    #[test]
    fn test_compact_preserves_block_counts() {
        let mut disk = disk("2333133121414131402");
        let free_before = disk.free_blocks();
        let total_before = disk.total_blocks();
        disk.compact();
        assert_eq!(disk.free_blocks(), free_before);
        assert_eq!(disk.total_blocks(), total_before);
    }

    #[test]
    fn test_compact_idempotent() {
        let mut disk = disk("12345");
        disk.compact();
        let once = disk.clone();
        disk.compact();
        assert_eq!(disk, once);
    }

    #[test]
    fn test_empty_disk_is_noop() {
        let mut disk = disk("");
        disk.compact();
        assert_eq!(disk.total_blocks(), 0);
        assert_eq!(disk.checksum(), 0);
    }

    #[test]
    fn test_no_free_space_is_noop() {
        let mut disk = disk("5");
        let before = disk.clone();
        disk.compact();
        assert_eq!(disk, before);
        // positions 0..5 all owned by file 0
        assert_eq!(disk.checksum(), 0);
    }

    #[test]
    fn test_all_free_is_noop() {
        // zero-length file followed by a free run
        let mut disk = disk("09");
        assert_eq!(disk.free_blocks(), 9);
        disk.compact();
        assert_eq!(disk.checksum(), 0);
    }
}
