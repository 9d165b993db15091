//! `tabula-model` defines the core in-memory timetable data structures.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the binary wire codec (`tabula-wire`)
//! - on-disk record management (`tabula-fs`)
//! - front ends via `serde` (JSON-safe schema)

#![forbid(unsafe_code)]

mod cell;
mod merge;
mod timetable;
pub mod week;

pub use cell::{utf16_len, Cell};
pub use merge::{build_table, MergeEntry, MergeStateTable, MergeTableError, MERGE_TABLE_SIZE};
pub use timetable::{
    Timetable, CELL_COUNT, COLUMN_COUNT, MAXIMUM_MERGED_ROW, MAXIMUM_MERGED_ROWS,
    MAX_STRING_LENGTH, ROW_COUNT,
};
