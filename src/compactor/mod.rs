//! Compaction policies for the simulated disk
//!
//! Two policies share one contract:
//! - Block-granular ([`block::BlockDisk`]): individual blocks move, files may
//!   end up split across the platter.
//! - Extent-granular ([`extent::ExtentDisk`]): whole files move, internal
//!   contiguity is preserved, placement is first-fit and leftward-only.

pub mod block;
pub mod extent;

/// Compaction policy contract
///
/// A compactor owns one disk layout for the duration of a run and mutates it
/// in place to its terminal state.
pub trait Compactor {
    /// Defragment the layout in place. Calling this again after convergence
    /// is a no-op.
    fn compact(&mut self);

    /// Positional checksum of the current layout: the sum of
    /// `position * file_id` over all occupied positions.
    fn checksum(&self) -> u64;

    /// Total number of blocks on the disk (occupied plus free).
    fn total_blocks(&self) -> usize;

    /// Number of free blocks on the disk. Compaction never changes this.
    fn free_blocks(&self) -> usize;
}
