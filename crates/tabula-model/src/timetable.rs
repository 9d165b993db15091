use serde::Serialize;

use crate::week;
use crate::Cell;

/// Time slots per day.
pub const ROW_COUNT: usize = 12;

/// School days per week.
pub const COLUMN_COUNT: usize = 5;

/// Total cells in the grid.
pub const CELL_COUNT: usize = ROW_COUNT * COLUMN_COUNT;

/// Maximum cell string length in UTF-16 code units (one length byte on the
/// wire).
pub const MAX_STRING_LENGTH: usize = u8::MAX as usize;

/// Maximum number of disjoint merged row ranges in one column.
pub const MAXIMUM_MERGED_ROW: usize = ROW_COUNT / 2;

/// Exclusive upper bound for merge indices: `2^(ROW_COUNT - 1) - 1`.
pub const MAXIMUM_MERGED_ROWS: u16 = (1 << (ROW_COUNT - 1)) - 1;

/// Sentinel begin date for a store holding no record.
const INVALID_DATE: i64 = -1;

/// The timetable record: term start date, the cell grid, and one merge index
/// per column.
///
/// The store is either **Invalid** (freshly constructed or cleared; sentinel
/// start date, empty cells, zero merge indices) or **Valid** (fully
/// populated by a successful deserialization). The three parts form one
/// atomic record: they are only ever replaced together.
///
/// This is a plain owned value; whoever drives the UI owns it and passes it
/// by reference. Access is serialized by `&mut`; there is no internal
/// locking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Timetable {
    begin_date: i64,
    cells: [[Cell; COLUMN_COUNT]; ROW_COUNT],
    merge_indices: [u16; COLUMN_COUNT],
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}

impl Timetable {
    /// An Invalid, empty store.
    pub fn new() -> Self {
        Self {
            begin_date: INVALID_DATE,
            cells: Default::default(),
            merge_indices: [0; COLUMN_COUNT],
        }
    }

    /// Term start date as an epoch day, or the negative sentinel when the
    /// store is Invalid.
    #[inline]
    pub fn begin_date(&self) -> i64 {
        self.begin_date
    }

    /// Set the term start date. The value must lie in the supported range.
    pub fn set_begin_date(&mut self, epoch_day: i64) {
        assert!(
            (week::MIN_DATE..=week::MAX_DATE).contains(&epoch_day),
            "begin date out of range: {epoch_day}"
        );
        self.begin_date = epoch_day;
    }

    /// True once a record has been loaded and not cleared since.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.begin_date >= 0
    }

    /// Reset to the Invalid state: sentinel date, empty cells, zero merge
    /// indices.
    pub fn clear(&mut self) {
        self.begin_date = INVALID_DATE;
        for row in &mut self.cells {
            for cell in row {
                cell.clear();
            }
        }
        self.merge_indices = [0; COLUMN_COUNT];
    }

    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        validate_row_index(row);
        validate_column_index(column);
        &self.cells[row][column]
    }

    #[inline]
    pub fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        validate_row_index(row);
        validate_column_index(column);
        &mut self.cells[row][column]
    }

    #[inline]
    pub fn merge_index(&self, column: usize) -> u16 {
        validate_column_index(column);
        self.merge_indices[column]
    }

    /// Set a column's merge index. Must be below [`MAXIMUM_MERGED_ROWS`].
    pub fn set_merge_index(&mut self, column: usize, index: u16) {
        validate_column_index(column);
        assert!(
            index < MAXIMUM_MERGED_ROWS,
            "merge index out of range: {index}"
        );
        self.merge_indices[column] = index;
    }

    /// Week parity on the given day. The store must be Valid.
    pub fn is_even_on(&self, now: i64) -> bool {
        debug_assert!(self.is_valid(), "week parity queried on an invalid store");
        week::is_even(self.begin_date, now)
    }

    /// Week parity today. The store must be Valid.
    pub fn is_even(&self) -> bool {
        self.is_even_on(week::today())
    }

    /// Text visible in a cell on the given day: the odd or even variant per
    /// the week parity. The store must be Valid.
    pub fn visible_text(&self, row: usize, column: usize, now: i64) -> &str {
        let even_week = self.is_even_on(now);
        self.cell(row, column).visible(even_week)
    }
}

#[inline]
fn validate_row_index(row: usize) {
    assert!(row < ROW_COUNT, "row index out of range: {row}");
}

#[inline]
fn validate_column_index(column: usize) {
    assert!(column < COLUMN_COUNT, "column index out of range: {column}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_invalid_and_empty() {
        let table = Timetable::new();
        assert!(!table.is_valid());
        assert!(table.begin_date() < 0);
        for row in 0..ROW_COUNT {
            for column in 0..COLUMN_COUNT {
                assert!(table.cell(row, column).is_empty());
            }
        }
        for column in 0..COLUMN_COUNT {
            assert_eq!(table.merge_index(column), 0);
        }
    }

    #[test]
    fn clear_resets_everything() {
        let mut table = Timetable::new();
        table.set_begin_date(19_000);
        table.cell_mut(3, 2).odd = "chemistry".to_string();
        table.set_merge_index(1, 0b11);
        assert!(table.is_valid());

        table.clear();
        assert!(!table.is_valid());
        assert!(table.cell(3, 2).is_empty());
        assert_eq!(table.merge_index(1), 0);
    }

    #[test]
    fn visible_text_follows_week_parity() {
        let mut table = Timetable::new();
        table.set_begin_date(19_000);
        *table.cell_mut(0, 0) = Cell::new("odd class", "even class");
        // Week 1 displays the "even" variant (inherited convention).
        assert_eq!(table.visible_text(0, 0, 19_000), "even class");
        assert_eq!(table.visible_text(0, 0, 19_007), "odd class");
    }

    #[test]
    #[should_panic(expected = "row index out of range")]
    fn cell_access_is_bounds_checked() {
        let table = Timetable::new();
        let _ = table.cell(ROW_COUNT, 0);
    }

    #[test]
    #[should_panic(expected = "merge index out of range")]
    fn merge_index_upper_bound_is_enforced() {
        let mut table = Timetable::new();
        table.set_merge_index(0, MAXIMUM_MERGED_ROWS);
    }
}
