//! Dense map parsing
//!
//! The dense map is a single line of ASCII digits with alternating meaning,
//! starting with a file length: positions 0, 2, 4, ... are file lengths (in
//! blocks) for sequential file ids 0, 1, 2, ...; positions 1, 3, 5, ... are
//! free-run lengths. A digit of `0` is a zero-length run and emits no blocks.

use crate::error::{DiskError, Result};

/// A validated dense map.
///
/// Construction rejects any byte outside `'0'..='9'`, so downstream consumers
/// never see a truncated or partially decoded layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMap {
    digits: Vec<u8>,
}

/// One run of blocks described by a single dense-map digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// `len` blocks owned by file `id`. Ids are dense and 0-based, assigned
    /// in left-to-right order of appearance.
    File { id: u32, len: usize },
    /// `len` unowned blocks.
    Free { len: usize },
}

impl DenseMap {
    /// Parse a dense map from its string form.
    pub fn parse(input: &str) -> Result<Self> {
        let mut digits = Vec::with_capacity(input.len());

        for (position, byte) in input.bytes().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(DiskError::InvalidDigit { position, byte });
            }
            digits.push(byte - b'0');
        }

        Ok(DenseMap { digits })
    }

    /// Total number of blocks the map describes (sum of all digits).
    pub fn total_blocks(&self) -> usize {
        self.digits.iter().map(|&d| d as usize).sum()
    }

    /// Number of files the map describes (every even digit position is a
    /// file, including zero-length ones, which still consume a file id).
    pub fn file_count(&self) -> usize {
        self.digits.len().div_ceil(2)
    }

    /// Iterate the runs in layout order. Zero-length runs are yielded as-is;
    /// consumers must not emit blocks for them.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            digits: &self.digits,
            index: 0,
        }
    }
}

/// Iterator over the runs of a [`DenseMap`].
#[derive(Debug)]
pub struct Runs<'a> {
    digits: &'a [u8],
    index: usize,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let digit = *self.digits.get(self.index)?;
        let len = digit as usize;

        let run = if self.index % 2 == 0 {
            Run::File {
                id: (self.index / 2) as u32,
                len,
            }
        } else {
            Run::Free { len }
        };

        self.index += 1;
        Some(run)
    }
}
