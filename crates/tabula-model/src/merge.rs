//! Merge-state lookup table.
//!
//! A merge index selects, per column, a precomputed set of contiguous row
//! ranges to render as one merged cell. The table is a flat byte blob with a
//! fixed 13-byte stride per entry: one count byte followed by up to six
//! `(first_row, last_row)` pairs.
//!
//! The index is a combinatorial encoding: bit `b` of the index (11 adjacency
//! bits over 12 rows) marks rows `b` and `b + 1` as merged, and maximal runs
//! of set bits become ranges. [`build_table`] generates the packaged blob
//! from that encoding; [`MergeStateTable::from_reader`] loads an external
//! blob under the same exact-size contract.

use std::io::Read;
use std::sync::OnceLock;

use thiserror::Error;

use crate::{MAXIMUM_MERGED_ROW, MAXIMUM_MERGED_ROWS, ROW_COUNT};

/// Bytes per table entry: a count byte plus `(first_row, last_row)` pairs.
const ENTRY_STRIDE: usize = MAXIMUM_MERGED_ROW * 2 + 1;

/// Exact size of the table blob in bytes.
pub const MERGE_TABLE_SIZE: usize = (MAXIMUM_MERGED_ROWS as usize + 1) * ENTRY_STRIDE;

/// Failed to obtain the merge-state table.
///
/// The table is required for rendering; callers are expected to treat this
/// as an unrecoverable startup failure rather than retry.
#[derive(Debug, Error)]
pub enum MergeTableError {
    #[error("I/O error reading merge-state table: {0}")]
    Io(#[from] std::io::Error),
    #[error("merge-state table must be exactly {MERGE_TABLE_SIZE} bytes, got {0}")]
    WrongSize(usize),
}

/// Immutable merge-state table, loaded once and shared for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStateTable {
    data: Box<[u8]>,
}

impl MergeStateTable {
    /// Wrap an already-loaded blob, validating its exact size.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MergeTableError> {
        if bytes.len() != MERGE_TABLE_SIZE {
            return Err(MergeTableError::WrongSize(bytes.len()));
        }
        Ok(Self {
            data: bytes.into_boxed_slice(),
        })
    }

    /// Read a table blob from `reader`. A short read is fatal.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, MergeTableError> {
        let mut data = vec![0u8; MERGE_TABLE_SIZE];
        reader.read_exact(&mut data)?;
        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    /// The process-wide table generated from the combinatorial encoding.
    pub fn builtin() -> &'static MergeStateTable {
        static TABLE: OnceLock<MergeStateTable> = OnceLock::new();
        TABLE.get_or_init(|| MergeStateTable {
            data: build_table().into_boxed_slice(),
        })
    }

    /// Borrow the entry for `index`. No bytes are copied.
    ///
    /// `index` must be below [`MAXIMUM_MERGED_ROWS`]; the final table slot
    /// exists in the blob but is unreachable through this accessor.
    pub fn entry(&self, index: u16) -> MergeEntry<'_> {
        assert!(
            index < MAXIMUM_MERGED_ROWS,
            "merge index out of range: {index}"
        );
        let start = index as usize * ENTRY_STRIDE;
        MergeEntry {
            entry: &self.data[start..start + ENTRY_STRIDE],
        }
    }
}

/// Read-only view of one table entry.
#[derive(Debug, Clone, Copy)]
pub struct MergeEntry<'a> {
    entry: &'a [u8],
}

impl MergeEntry<'_> {
    /// Number of merged row ranges in this entry, `0..=6`.
    #[inline]
    pub fn count(&self) -> usize {
        self.entry[0] as usize
    }

    /// The `i`-th `(first_row, last_row)` range, both bounds inclusive and
    /// validated to lie inside the grid.
    pub fn range(&self, i: usize) -> (u8, u8) {
        assert!(i < self.count(), "merge range index out of range: {i}");
        let first = self.entry[1 + 2 * i];
        let last = self.entry[2 + 2 * i];
        assert!((first as usize) < ROW_COUNT, "first row out of range: {first}");
        assert!((last as usize) < ROW_COUNT, "last row out of range: {last}");
        (first, last)
    }

    /// Iterate over all ranges in order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.count()).map(|i| self.range(i))
    }
}

/// Generate the full table blob from the adjacency-bit encoding.
///
/// Entry layout per index: count byte, then `(first_row, last_row)` pairs in
/// ascending row order, zero padding to the fixed stride.
pub fn build_table() -> Vec<u8> {
    let mut data = vec![0u8; MERGE_TABLE_SIZE];
    for index in 0..=MAXIMUM_MERGED_ROWS as usize {
        let base = index * ENTRY_STRIDE;
        let mut count = 0usize;
        let mut bit = 0usize;
        while bit < ROW_COUNT - 1 {
            if index & (1 << bit) == 0 {
                bit += 1;
                continue;
            }
            let first = bit;
            while bit < ROW_COUNT - 1 && index & (1 << bit) != 0 {
                bit += 1;
            }
            // The run covers adjacency bits first..bit, i.e. rows first..=bit.
            data[base + 1 + 2 * count] = first as u8;
            data[base + 2 + 2 * count] = bit as u8;
            count += 1;
        }
        debug_assert!(count <= MAXIMUM_MERGED_ROW);
        data[base] = count as u8;
    }
    data
}
