//! File boundary for snapshot download/upload.

use crate::model::book::Book;
use crate::snapshot::codec::{encode_books, ImportError};
use chrono::NaiveDate;
use std::io;
use std::path::{Path, PathBuf};

/// Builds the export file name, e.g. `homework_stats_2024-01-31.json`.
pub fn snapshot_file_name(basename: &str, date: NaiveDate) -> String {
    format!("{basename}_{}.json", date.format("%Y-%m-%d"))
}

/// Writes the encoded collection into `dir` and returns the file path.
///
/// An existing file with the same name is overwritten.
pub fn write_snapshot_file(
    dir: &Path,
    basename: &str,
    date: NaiveDate,
    books: &[Book],
) -> io::Result<PathBuf> {
    let contents = encode_books(books).map_err(io::Error::other)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(snapshot_file_name(basename, date));
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Reads snapshot text from disk.
pub fn read_snapshot_file(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path)
        .map_err(|err| ImportError::Read(format!("`{}`: {err}", path.display())))
}
