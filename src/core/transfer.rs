use std::path::Path;

use thiserror::Error;
use tracing::warn;

use super::clipboard::{BufferEntry, BufferMode};
use super::lister::Entry;
use crate::fs::{FilesystemPort, FsError};

/// Outcome of one paste batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOutcome {
    pub success_count: usize,
    pub failure_count: usize,
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("buffer is empty")]
    EmptyBuffer,
}

/// Executes every buffered item against `dest_dir`, strictly in insertion
/// order and sequentially, so the counts stay deterministic and two items
/// never interleave partial writes into the same directory.
///
/// An empty buffer fails fast before any I/O. Each item's failure is caught
/// and counted; the batch always runs to the end. The engine does not touch
/// the buffer or the panes — the coordinator refreshes and clears afterward.
pub fn paste(
    fs: &dyn FilesystemPort,
    buffer: &[BufferEntry],
    dest_dir: &Path,
) -> Result<PasteOutcome, TransferError> {
    if buffer.is_empty() {
        return Err(TransferError::EmptyBuffer);
    }

    let mut success_count = 0;
    let mut failure_count = 0;
    for item in buffer {
        let result = match item.mode {
            BufferMode::Copy => copy_entry(fs, &item.entry, dest_dir),
            BufferMode::Cut => move_entry(fs, &item.entry, dest_dir),
        };
        match result {
            Ok(()) => success_count += 1,
            Err(err) => {
                warn!(source = %item.entry.path.display(), %err, "transfer item failed");
                failure_count += 1;
            }
        }
    }
    Ok(PasteOutcome {
        success_count,
        failure_count,
    })
}

/// Copies one buffered entry into the destination directory. Files use the
/// port's exclusive-create copy; a pre-existing destination fails the item
/// rather than overwriting it.
fn copy_entry(fs: &dyn FilesystemPort, entry: &Entry, dest_dir: &Path) -> Result<(), FsError> {
    let dest = dest_dir.join(&entry.name);
    if entry.is_dir {
        copy_directory(fs, &entry.path, &dest)
    } else {
        fs.copy_file(&entry.path, &dest)
    }
}

/// Depth-first recursive copy. Creating an already-existing destination
/// directory is fine (make_directory is idempotent), but any child failure
/// aborts and fails the whole top-level item.
fn copy_directory(fs: &dyn FilesystemPort, src: &Path, dest: &Path) -> Result<(), FsError> {
    fs.make_directory(dest)?;
    for child in fs.list(src)? {
        let child_src = src.join(&child.name);
        let child_dest = dest.join(&child.name);
        if child.is_dir {
            copy_directory(fs, &child_src, &child_dest)?;
        } else {
            fs.copy_file(&child_src, &child_dest)?;
        }
    }
    Ok(())
}

/// Moves are a single rename of the top-level entry; atomicity is whatever
/// the underlying rename offers. No copy+delete fallback.
fn move_entry(fs: &dyn FilesystemPort, entry: &Entry, dest_dir: &Path) -> Result<(), FsError> {
    fs.rename(&entry.path, &dest_dir.join(&entry.name))
}
