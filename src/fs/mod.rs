use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

pub mod memory;
pub mod real;

pub use real::RealFs;

/// Filesystem failure taxonomy surfaced by the port.
///
/// Every variant carries the path it refers to; the display form is what
/// ends up in pane error lines and status messages.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("{message}: {path}")]
    Other { path: PathBuf, message: String },
}

impl FsError {
    /// Maps an `io::Error` onto the taxonomy, attaching the path it occurred on.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            io::ErrorKind::NotADirectory => FsError::NotADirectory(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            _ => FsError::Other {
                path,
                message: err.to_string(),
            },
        }
    }
}

/// One item as enumerated by the port, before the lister attaches full paths
/// and ordering. `size` and `modified` are best-effort: a failed stat leaves
/// them unset rather than failing the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PortEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Local>>,
}

/// The seam between the browser core and actual storage.
///
/// `RealFs` backs it with std::fs; `MemoryFs` provides a deterministic
/// in-memory tree for tests. The core only ever talks to this trait.
pub trait FilesystemPort {
    /// Enumerates the children of a directory. Fails for missing paths,
    /// permission problems, and non-directories; never fails because a
    /// single child could not be stat'ed.
    fn list(&self, path: &Path) -> Result<Vec<PortEntry>, FsError>;

    /// Copies one regular file. Exclusive create: an existing destination
    /// is an error, never overwritten.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), FsError>;

    /// Creates a directory, parents included. Idempotent: an already
    /// existing directory is not an error.
    fn make_directory(&self, path: &Path) -> Result<(), FsError>;

    /// Moves a file or directory in one step, with whatever atomicity the
    /// platform rename offers.
    fn rename(&self, src: &Path, dst: &Path) -> Result<(), FsError>;

    /// Parent of `path`, or `path` itself at the filesystem root.
    fn parent_of(&self, path: &Path) -> PathBuf;
}
