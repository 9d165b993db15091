//! On-disk timetable record management.
//!
//! One record file per installation. Loading distinguishes three non-error
//! outcomes (loaded, not found on first run, malformed) from genuine I/O
//! failures, which propagate as errors. Saves are atomic:
//! the record is written to a temp file in the destination directory,
//! synced, then renamed into place, so a crashed save never corrupts the
//! previous record.

#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use tabula_model::Timetable;
use tabula_wire::{deserialize, serialize, LoadOutcome};

#[derive(Debug, Error)]
pub enum FsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to persist record: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Outcome of a record load. All three variants are ordinary program
/// states, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The record parsed; the store holds it now.
    Loaded,
    /// No record exists yet (first run).
    NotFound,
    /// The file exists but is malformed; the store is untouched.
    Invalid,
}

/// Load the record at `path` into `table`.
///
/// A missing file reports [`LoadStatus::NotFound`]; a malformed one reports
/// [`LoadStatus::Invalid`] and leaves both the store and the file untouched.
pub fn load(path: &Path, table: &mut Timetable) -> Result<LoadStatus, FsError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no record at {}", path.display());
            return Ok(LoadStatus::NotFound);
        }
        Err(err) => return Err(err.into()),
    };
    match deserialize(table, BufReader::new(file))? {
        LoadOutcome::Loaded => Ok(LoadStatus::Loaded),
        LoadOutcome::InvalidFile => {
            warn!("malformed record at {}", path.display());
            Ok(LoadStatus::Invalid)
        }
    }
}

/// Load the app-local record, deleting it on I/O failure.
///
/// The startup path uses this so a file that fails with a genuine read
/// error (not a malformed record) doesn't fail again on every launch. The
/// original error is still returned.
pub fn load_or_discard(path: &Path, table: &mut Timetable) -> Result<LoadStatus, FsError> {
    match load(path, table) {
        Err(err) => {
            warn!("reading record at {} failed, discarding it", path.display());
            discard(path);
            Err(err)
        }
        ok => ok,
    }
}

/// Best-effort removal of the record at `path`. A missing file is fine;
/// any other failure is logged and swallowed.
pub fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("discarded record at {}", path.display()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!("failed to discard record at {}: {err}", path.display()),
    }
}

/// Atomically write the store's record to `path`.
///
/// The store must be Valid. Writes go to a temp file in the destination
/// directory (avoids cross-device renames), are flushed and synced, then
/// renamed into place with replace semantics.
pub fn save(path: &Path, table: &Timetable) -> Result<(), FsError> {
    let bytes = serialize(table);
    let mut temp = tempfile::NamedTempFile::new_in(parent_dir_or_dot(path))?;
    temp.write_all(bytes.as_slice())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    debug!("saved {} byte record to {}", bytes.len(), path.display());
    Ok(())
}

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` returns `Some("")` for bare relative file names;
    // treat that as the current directory.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
