use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::fs::{FilesystemPort, FsError};

/// Immutable snapshot of one filesystem item at listing time.
///
/// `path` is the identity key for the whole session (absolute, normalized by
/// construction: cwd joined with the enumerated name). Entries are never
/// mutated, only superseded by a re-listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Local>>,
}

/// Lists a directory through the port and applies the display order.
pub fn list_directory(fs: &dyn FilesystemPort, path: &Path) -> Result<Vec<Entry>, FsError> {
    let mut entries: Vec<Entry> = fs
        .list(path)?
        .into_iter()
        .map(|item| Entry {
            path: path.join(&item.name),
            name: item.name,
            is_dir: item.is_dir,
            size: item.size,
            modified: item.modified,
        })
        .collect();
    sort_entries(&mut entries);
    Ok(entries)
}

/// Directories before files; case-insensitive name order within each group.
/// The sort is stable, so names identical under case folding keep their
/// enumeration order.
fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}
