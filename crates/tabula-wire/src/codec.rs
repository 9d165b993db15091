use std::io::{self, Read};

use tracing::{debug, warn};

use tabula_model::{
    utf16_len, Timetable, CELL_COUNT, COLUMN_COUNT, MAXIMUM_MERGED_ROWS, MAX_STRING_LENGTH,
    ROW_COUNT,
};

use crate::ByteAppender;

/// Size of a record whose cells are all empty: date + 60 cells of two empty
/// strings + one merge index per column.
pub const MIN_FILE_SIZE: usize = 4 + CELL_COUNT * 2 + COLUMN_COUNT * 2;

/// Serialization capacity hint.
pub const ESTIMATED_FILE_SIZE: usize = MIN_FILE_SIZE + 100;

/// Result of deserializing a record.
///
/// Truncation and out-of-range field values are deliberately
/// indistinguishable: both are [`LoadOutcome::InvalidFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The record parsed and the store now holds it.
    Loaded,
    /// The record is malformed; the store was left untouched.
    InvalidFile,
}

/// Serialize a Valid store into the exact wire byte sequence.
pub fn serialize(table: &Timetable) -> ByteAppender {
    debug_assert!(table.is_valid(), "serializing an invalid store");
    debug!("serialize timetable record");
    let mut out = ByteAppender::with_capacity(ESTIMATED_FILE_SIZE);
    write_u32_le(&mut out, table.begin_date() as u32);
    for row in 0..ROW_COUNT {
        for column in 0..COLUMN_COUNT {
            let cell = table.cell(row, column);
            write_string(&mut out, &cell.odd);
            write_string(&mut out, &cell.even);
        }
    }
    for column in 0..COLUMN_COUNT {
        write_u16_le(&mut out, table.merge_index(column));
    }
    out
}

/// Deserialize a record from `reader` into `table`.
///
/// On [`LoadOutcome::Loaded`] the whole store is replaced atomically; on
/// [`LoadOutcome::InvalidFile`] (malformed content or premature EOF) the
/// prior store state is untouched. Non-EOF I/O errors propagate as `Err`
/// and likewise leave the store untouched.
pub fn deserialize<R: Read>(table: &mut Timetable, mut reader: R) -> io::Result<LoadOutcome> {
    debug!("deserialize timetable record");
    match parse_record(&mut reader) {
        Ok(Some(staged)) => {
            *table = staged;
            Ok(LoadOutcome::Loaded)
        }
        Ok(None) => Ok(LoadOutcome::InvalidFile),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            warn!("record truncated: {err}");
            Ok(LoadOutcome::InvalidFile)
        }
        Err(err) => Err(err),
    }
}

/// Parse a full record into a staged store. `Ok(None)` means the content
/// failed validation.
fn parse_record<R: Read>(reader: &mut R) -> io::Result<Option<Timetable>> {
    let mut staged = Timetable::new();

    let epoch_day = read_u32_le(reader)?;
    if i64::from(epoch_day) > tabula_model::week::MAX_DATE {
        warn!("start date out of range: {epoch_day}");
        return Ok(None);
    }
    staged.set_begin_date(i64::from(epoch_day));

    for row in 0..ROW_COUNT {
        for column in 0..COLUMN_COUNT {
            let odd = read_string(reader)?;
            let even = read_string(reader)?;
            let cell = staged.cell_mut(row, column);
            cell.odd = odd;
            cell.even = even;
        }
    }

    for column in 0..COLUMN_COUNT {
        let merge_index = read_u16_le(reader)?;
        if merge_index >= MAXIMUM_MERGED_ROWS {
            warn!("merge index out of range: {merge_index}");
            return Ok(None);
        }
        staged.set_merge_index(column, merge_index);
    }

    Ok(Some(staged))
}

fn read_u16_le<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut bytes = [0u8; 2];
    reader.read_exact(&mut bytes)?;
    Ok(u16::from_le_bytes(bytes))
}

fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

/// One length byte, then that many UTF-16LE code units.
fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut length = [0u8; 1];
    reader.read_exact(&mut length)?;
    let length = length[0] as usize;

    let mut raw = vec![0u8; length * 2];
    reader.read_exact(&mut raw)?;

    let mut units = Vec::with_capacity(length);
    for chunk in raw.chunks_exact(2) {
        units.push(u16::from_le_bytes([chunk[0], chunk[1]]));
    }
    Ok(String::from_utf16_lossy(&units))
}

fn write_u16_le(out: &mut ByteAppender, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_u32_le(out: &mut ByteAppender, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_string(out: &mut ByteAppender, value: &str) {
    let length = utf16_len(value);
    debug_assert!(
        length <= MAX_STRING_LENGTH,
        "cell string exceeds {MAX_STRING_LENGTH} UTF-16 units: {length}"
    );
    out.push(length as u8);
    for unit in value.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}
