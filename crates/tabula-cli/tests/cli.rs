use assert_cmd::Command;
use predicates::prelude::*;

use tabula_fs::save;
use tabula_model::{Cell, Timetable};

fn tabula() -> Command {
    Command::cargo_bin("tabula").unwrap()
}

fn write_sample_record(path: &std::path::Path) {
    let mut table = Timetable::new();
    table.set_begin_date(19_723); // 2024-01-01, a Monday
    *table.cell_mut(0, 0) = Cell::new("odd math", "even math");
    save(path, &table).unwrap();
}

#[test]
fn import_then_info_reports_week_and_parity() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.bin");
    let record = dir.path().join("timetable.bin");
    write_sample_record(&source);

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("import")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));

    tabula()
        .arg("--record")
        .arg(&record)
        .args(["info", "--date", "2024-01-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week:       1 (even-week display)"))
        .stdout(predicate::str::contains("Term start: 2024-01-01 (Mon)"));
}

#[test]
fn show_renders_the_selected_week_variant() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("timetable.bin");
    write_sample_record(&record);

    tabula()
        .arg("--record")
        .arg(&record)
        .args(["show", "--date", "2024-01-08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("odd math"));
}

#[test]
fn importing_garbage_fails_without_touching_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("garbage.bin");
    let record = dir.path().join("timetable.bin");
    std::fs::write(&source, [0xFF; 7]).unwrap();

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("import")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid timetable record"));
    assert!(!record.exists());
}

#[test]
fn info_without_a_record_points_at_import() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("timetable.bin");

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tabula import"));
}

#[test]
fn export_round_trips_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("timetable.bin");
    let dest = dir.path().join("backup.bin");
    write_sample_record(&record);

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("export")
        .arg(&dest)
        .assert()
        .success();
    assert_eq!(
        std::fs::read(&record).unwrap(),
        std::fs::read(&dest).unwrap()
    );
}

#[test]
fn dump_emits_json() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("timetable.bin");
    write_sample_record(&record);

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"begin_date\": 19723"));
}

#[test]
fn clear_removes_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("timetable.bin");
    write_sample_record(&record);

    tabula()
        .arg("--record")
        .arg(&record)
        .arg("clear")
        .assert()
        .success();
    assert!(!record.exists());
}
