//! Positional checksum shared by both disk representations
//!
//! `checksum = Σ (position × file_id)` over all occupied positions. The
//! accumulator is `u64`; for a dense map of `n` digits the sum is bounded by
//! `9n * (9n) * (n/2)`, far below `u64::MAX` at any realistic input size.

use crate::compactor::block::Slot;
use crate::compactor::extent::Extent;

/// Checksum of a flat block-owner array. Free slots contribute nothing.
pub fn slots(slots: &[Slot]) -> u64 {
    slots
        .iter()
        .enumerate()
        .map(|(position, slot)| match slot {
            Slot::File(id) => position as u64 * u64::from(*id),
            Slot::Free => 0,
        })
        .sum()
}

/// Checksum of an extent-based layout. `files[id]` is the extent owned by
/// file `id`; every index inside each extent contributes `index * id`.
pub fn extents(files: &[Extent]) -> u64 {
    let mut sum = 0u64;
    for (id, extent) in files.iter().enumerate() {
        for position in extent.start..extent.end {
            sum += position as u64 * id as u64;
        }
    }
    sum
}
