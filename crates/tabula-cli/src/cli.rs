use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tabula weekly timetable viewer.
#[derive(Parser)]
#[command(name = "tabula", version, about = "Weekly odd/even timetable viewer")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the app-local timetable record.
    #[arg(long, global = true, default_value = "timetable.bin")]
    pub record: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print term start date, current week number and display parity.
    Info(DateArgs),
    /// Render the timetable for the current (or given) day.
    Show(ShowArgs),
    /// Validate an external record file and install it as the app-local one.
    Import(ImportArgs),
    /// Write the app-local record to an external file.
    Export(ExportArgs),
    /// Delete the app-local record.
    Clear,
    /// Print the record as JSON.
    Dump,
}

#[derive(clap::Args)]
pub struct DateArgs {
    /// Evaluate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(clap::Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub date: DateArgs,

    /// Path to a JSON labels file overriding the built-in headers.
    #[arg(long)]
    pub labels: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Record file to import.
    pub source: PathBuf,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Destination file.
    pub dest: PathBuf,
}
