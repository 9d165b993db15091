use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Days, NaiveDate};
use tracing::debug;

use tabula_fs::{discard, load, load_or_discard, save, LoadStatus};
use tabula_model::{week, MergeStateTable, Timetable, COLUMN_COUNT, ROW_COUNT};

use crate::cli::{DateArgs, ExportArgs, ImportArgs, ShowArgs};
use crate::labels::Labels;

pub fn info(record: &Path, args: &DateArgs) -> Result<()> {
    let table = load_required(record)?;
    let now = resolve_day(args)?;
    let week_number = week::week_count(table.begin_date(), now);
    let variant = if table.is_even_on(now) { "even" } else { "odd" };
    println!("Record:     {}", record.display());
    println!("Term start: {}", format_day(table.begin_date())?);
    println!("As of:      {}", format_day(now)?);
    println!("Week:       {week_number} ({variant}-week display)");
    Ok(())
}

pub fn show(record: &Path, args: &ShowArgs) -> Result<()> {
    let table = load_required(record)?;
    let now = resolve_day(&args.date)?;
    let labels = match &args.labels {
        Some(path) => Labels::load(path)?,
        None => Labels::default(),
    };
    print!("{}", render(&table, &labels, now));
    Ok(())
}

pub fn import(record: &Path, args: &ImportArgs) -> Result<()> {
    let mut staged = Timetable::new();
    match load(&args.source, &mut staged)? {
        LoadStatus::Loaded => {}
        LoadStatus::NotFound => bail!("{} does not exist", args.source.display()),
        LoadStatus::Invalid => bail!("{} is not a valid timetable record", args.source.display()),
    }
    save(record, &staged)?;
    debug!("installed record from {}", args.source.display());
    println!(
        "Imported {} into {}",
        args.source.display(),
        record.display()
    );
    Ok(())
}

pub fn export(record: &Path, args: &ExportArgs) -> Result<()> {
    let table = load_required(record)?;
    save(&args.dest, &table)?;
    println!("Exported {} to {}", record.display(), args.dest.display());
    Ok(())
}

pub fn clear(record: &Path) -> Result<()> {
    discard(record);
    println!("Removed {}", record.display());
    Ok(())
}

pub fn dump(record: &Path) -> Result<()> {
    let table = load_required(record)?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}

/// Load the app-local record or explain why there is nothing to act on.
fn load_required(record: &Path) -> Result<Timetable> {
    let mut table = Timetable::new();
    match load_or_discard(record, &mut table)? {
        LoadStatus::Loaded => Ok(table),
        LoadStatus::NotFound => bail!(
            "no timetable record at {}; import one with `tabula import <file>`",
            record.display()
        ),
        LoadStatus::Invalid => bail!("{} is corrupted; re-import a record", record.display()),
    }
}

fn resolve_day(args: &DateArgs) -> Result<i64> {
    let Some(text) = &args.date else {
        return Ok(week::today());
    };
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date {text:?}, expected YYYY-MM-DD"))?;
    let day = date
        .signed_duration_since(NaiveDate::default())
        .num_days();
    if !(week::MIN_DATE..=week::MAX_DATE).contains(&day) {
        bail!("date {text} is outside the supported range");
    }
    Ok(day)
}

fn format_day(epoch_day: i64) -> Result<String> {
    let date = NaiveDate::default()
        .checked_add_days(Days::new(epoch_day as u64))
        .context("date out of range")?;
    Ok(date.format("%Y-%m-%d (%a)").to_string())
}

/// Render the visible week's grid, applying merged row ranges.
///
/// Merged ranges show the first row's text; continuation rows show `⋮`.
fn render(table: &Timetable, labels: &Labels, now: i64) -> String {
    let even_week = table.is_even_on(now);
    let week_number = week::week_count(table.begin_date(), now);
    let variant = if even_week { "even" } else { "odd" };

    // texts[row][0] is the row header, the rest are cell texts.
    let mut texts = vec![vec![String::new(); COLUMN_COUNT + 1]; ROW_COUNT + 1];
    texts[0] = labels.column_headers.clone();
    for row in 0..ROW_COUNT {
        texts[row + 1][0] = labels.row_headers[row].clone();
        for column in 0..COLUMN_COUNT {
            texts[row + 1][column + 1] =
                table.cell(row, column).visible(even_week).to_string();
        }
    }

    let states = MergeStateTable::builtin();
    for column in 0..COLUMN_COUNT {
        for (first, last) in states.entry(table.merge_index(column)).iter() {
            // The anchor row keeps its text; the rows it spans collapse.
            for row in first + 1..=last {
                texts[row as usize + 1][column + 1] = "⋮".to_string();
            }
        }
    }

    let widths: Vec<usize> = (0..=COLUMN_COUNT)
        .map(|column| {
            texts
                .iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("Week {week_number} ({variant}-week display)\n");
    for row in &texts {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
