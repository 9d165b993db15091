use pretty_assertions::assert_eq;
use proptest::prelude::*;

use tabula_model::{Cell, Timetable, COLUMN_COUNT, ROW_COUNT};
use tabula_wire::{deserialize, serialize, LoadOutcome};

fn sample() -> Timetable {
    let mut table = Timetable::new();
    table.set_begin_date(19_723);
    *table.cell_mut(0, 0) = Cell::new("高等数学", "线性代数");
    *table.cell_mut(5, 2) = Cell::new("", "physics lab");
    *table.cell_mut(11, 4) = Cell::new("𝄞 music", "choir");
    table.set_merge_index(0, 0b11);
    table.set_merge_index(3, 0b1010);
    table
}

#[test]
fn serialize_then_deserialize_reproduces_the_store() {
    let original = sample();
    let bytes = serialize(&original);

    let mut restored = Timetable::new();
    let outcome = deserialize(&mut restored, bytes.as_slice()).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(restored, original);
}

#[test]
fn max_length_strings_round_trip() {
    let mut table = Timetable::new();
    table.set_begin_date(0);
    // 255 UTF-16 code units, the wire maximum.
    table.cell_mut(2, 1).odd = "汉".repeat(255);
    table.cell_mut(2, 1).even = "x".repeat(255);

    let bytes = serialize(&table);
    let mut restored = Timetable::new();
    assert_eq!(
        deserialize(&mut restored, bytes.as_slice()).unwrap(),
        LoadOutcome::Loaded
    );
    assert_eq!(restored, table);
}

#[test]
fn a_loaded_store_is_replaced_wholesale() {
    let mut store = sample();
    let mut replacement = Timetable::new();
    replacement.set_begin_date(42);
    let bytes = serialize(&replacement);

    assert_eq!(
        deserialize(&mut store, bytes.as_slice()).unwrap(),
        LoadOutcome::Loaded
    );
    assert_eq!(store, replacement);
    assert!(store.cell(0, 0).is_empty());
}

proptest! {
    #[test]
    fn arbitrary_cell_text_round_trips(
        entries in proptest::collection::vec(
            (0..ROW_COUNT, 0..COLUMN_COUNT, ".{0,40}", ".{0,40}"),
            0..12,
        ),
        begin_date in 0i64..=2_932_896,
        merge_index in 0u16..2047,
    ) {
        let mut table = Timetable::new();
        table.set_begin_date(begin_date);
        for (row, column, odd, even) in entries {
            *table.cell_mut(row, column) = Cell::new(odd, even);
        }
        table.set_merge_index(2, merge_index);

        let bytes = serialize(&table);
        let mut restored = Timetable::new();
        prop_assert_eq!(
            deserialize(&mut restored, bytes.as_slice()).unwrap(),
            LoadOutcome::Loaded
        );
        prop_assert_eq!(restored, table);
    }
}
