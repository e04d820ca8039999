//! Extent-granular compaction
//!
//! The disk is a file table (one extent per file id) plus an ordered list of
//! free extents. Files are processed once each, highest id first, and moved
//! whole into the first free extent that fits and lies strictly to their
//! left. Space a file vacates is never returned to the free list: a placed
//! file must keep its position, and resurrecting the gap could let a lower-id
//! file land somewhere a higher-id file's final position depends on.

use crate::checksum;
use crate::compactor::Compactor;
use crate::dense_map::{DenseMap, Run};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A contiguous half-open range of blocks `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// First block index in the extent.
    pub start: usize,
    /// One past the last block index.
    pub end: usize,
}

impl Extent {
    pub fn new(start: usize, end: usize) -> Self {
        Extent { start, end }
    }

    /// Number of blocks covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this extent contains a block index.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Extent-based representation of the disk.
///
/// `files[id]` is the extent currently owned by file `id`; every file keeps
/// its decode-time length for the lifetime of the disk. The free list stays
/// sorted by ascending `start` without re-sorting, because compaction only
/// shrinks entries in place or removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtentDisk {
    files: Vec<Extent>,
    free: Vec<Extent>,
    total_blocks: usize,
}

impl ExtentDisk {
    /// Build the file table and free list from a dense map.
    ///
    /// Zero-length file runs still consume a file id (and get an empty
    /// extent); zero-length free runs produce no free-list entry.
    pub fn from_dense_map(map: &DenseMap) -> Self {
        let mut files = Vec::with_capacity(map.file_count());
        let mut free = Vec::new();
        let mut cursor = 0usize;

        for run in map.runs() {
            match run {
                Run::File { len, .. } => {
                    files.push(Extent::new(cursor, cursor + len));
                    cursor += len;
                }
                Run::Free { len } => {
                    if len > 0 {
                        free.push(Extent::new(cursor, cursor + len));
                    }
                    cursor += len;
                }
            }
        }

        ExtentDisk {
            files,
            free,
            total_blocks: cursor,
        }
    }

    /// Current file table, indexed by file id.
    pub fn files(&self) -> &[Extent] {
        &self.files
    }

    /// Remaining free extents, ascending by `start`.
    pub fn free_list(&self) -> &[Extent] {
        &self.free
    }

    /// First-fit search: the free-list index of the first extent (ascending
    /// `start`) that can hold `len` blocks and starts left of `before`.
    fn find_free(&self, len: usize, before: usize) -> Option<usize> {
        self.free
            .iter()
            .position(|extent| extent.len() >= len && extent.start < before)
    }
}

impl Compactor for ExtentDisk {
    fn compact(&mut self) {
        let mut moves = 0usize;

        for id in (0..self.files.len()).rev() {
            let file = self.files[id];
            let len = file.len();
            if len == 0 {
                continue;
            }

            let Some(index) = self.find_free(len, file.start) else {
                continue;
            };

            let target = self.free[index];
            self.files[id] = Extent::new(target.start, target.start + len);
            moves += 1;

            if target.len() == len {
                self.free.remove(index);
            } else {
                // Shrink from the left; ascending start order is preserved.
                self.free[index].start += len;
            }
        }

        debug!("extent compaction moved {} files", moves);
    }

    fn checksum(&self) -> u64 {
        checksum::extents(&self.files)
    }

    fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    fn free_blocks(&self) -> usize {
        let occupied: usize = self.files.iter().map(Extent::len).sum();
        self.total_blocks - occupied
    }
}

impl fmt::Display for ExtentDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut owners = vec![None; self.total_blocks];
        for (id, extent) in self.files.iter().enumerate() {
            for owner in &mut owners[extent.start..extent.end] {
                *owner = Some(id);
            }
        }
        for owner in owners {
            match owner {
                Some(id) => write!(f, "{id}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}
