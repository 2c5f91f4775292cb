//! Filesystem helpers shared by the cleaner and the layout report.

use std::{fs, path::Path};

use chrono::{DateTime, Local};
use walkdir::WalkDir;

/// Calculate the total size of a directory and all its contents.
///
/// Entries that cannot be read are skipped. A missing path measures zero and a
/// plain file measures its own length.
#[must_use]
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// The local modification time of a path, if it exists and the platform
/// reports one.
#[must_use]
pub fn last_modified(path: &Path) -> Option<DateTime<Local>> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(modified.into())
}
