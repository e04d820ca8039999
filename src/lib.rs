//! Platter — single-platter disk defragmentation simulator
//!
//! Simulates a disk of fixed-size blocks described by a *dense map* (an
//! alternating file-length/free-length digit string), defragments it under
//! two placement policies, and reduces the terminal layout to a positional
//! checksum.
//!
//! ## Policies
//!
//! - **Block-granular** ([`BlockDisk`]): individual blocks move; the
//!   rightmost owned block fills the leftmost free slot until no gap remains
//!   left of any data.
//! - **Extent-granular** ([`ExtentDisk`]): whole files move, highest file id
//!   first, into the first free extent that fits strictly to their left
//!   (first-fit, never best-fit). Vacated space is not reusable.
//!
//! Both implement the [`Compactor`] trait.
//!
//! ## Example
//!
//! ```rust
//! use platter_rs::{BlockDisk, Compactor, DenseMap, ExtentDisk};
//!
//! let map = DenseMap::parse("2333133121414131402").unwrap();
//!
//! let mut blocks = BlockDisk::from_dense_map(&map);
//! blocks.compact();
//! assert_eq!(blocks.checksum(), 1928);
//!
//! let mut extents = ExtentDisk::from_dense_map(&map);
//! extents.compact();
//! assert_eq!(extents.checksum(), 2858);
//! ```

pub mod checksum;
pub mod compactor;
pub mod dense_map;
pub mod error;

// Re-export commonly used types
pub use compactor::block::{BlockDisk, Slot};
pub use compactor::extent::{Extent, ExtentDisk};
pub use compactor::Compactor;
pub use dense_map::{DenseMap, Run};
pub use error::{DiskError, Result};
