//! Binary wire codec for timetable records.
//!
//! Layout (little-endian throughout, fixed sequence, no framing):
//!
//! 1. term start date: 4 bytes, epoch day count; values above the supported
//!    date range (read as unsigned) reject the record;
//! 2. `ROW_COUNT * COLUMN_COUNT` cells in row-major order, each `odd` string
//!    then `even` string; a string is one length byte (0..=255) followed by
//!    that many UTF-16LE code units, no BOM, no terminator;
//! 3. one 2-byte merge index per column; indices at or above
//!    `MAXIMUM_MERGED_ROWS` reject the record.
//!
//! There is no version header and no checksum. Any future field addition is
//! a silent-corruption risk for existing files; the format does not support
//! evolution.
//!
//! Truncation anywhere is reported as [`LoadOutcome::InvalidFile`], exactly
//! like a semantic validation failure. Only genuine I/O errors (not EOF)
//! surface as `Err`.

#![forbid(unsafe_code)]

mod appender;
mod codec;

pub use appender::ByteAppender;
pub use codec::{deserialize, serialize, LoadOutcome, ESTIMATED_FILE_SIZE, MIN_FILE_SIZE};
