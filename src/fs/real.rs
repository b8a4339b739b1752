use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{FilesystemPort, FsError, PortEntry};

/// OS-backed filesystem port.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        RealFs
    }
}

impl FilesystemPort for RealFs {
    fn list(&self, path: &Path) -> Result<Vec<PortEntry>, FsError> {
        // read_dir succeeds on non-directories on some platforms only at
        // iteration time, so check up front for a uniform error.
        let meta = fs::metadata(path).map_err(|e| FsError::from_io(e, path))?;
        if !meta.is_dir() {
            return Err(FsError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for item in fs::read_dir(path).map_err(|e| FsError::from_io(e, path))? {
            let item = match item {
                Ok(item) => item,
                // A single unreadable dirent never aborts the listing.
                Err(_) => continue,
            };
            let name = item.file_name().to_string_lossy().to_string();

            // Best-effort stat, following symlinks so a link to a directory
            // navigates like one. Broken links fall back to the dirent type.
            match fs::metadata(item.path()) {
                Ok(meta) => {
                    let is_dir = meta.is_dir();
                    entries.push(PortEntry {
                        name,
                        is_dir,
                        size: if is_dir { None } else { Some(meta.len()) },
                        modified: meta.modified().ok().map(DateTime::<Local>::from),
                    });
                }
                Err(_) => {
                    let is_dir = item.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    entries.push(PortEntry {
                        name,
                        is_dir,
                        size: None,
                        modified: None,
                    });
                }
            }
        }
        Ok(entries)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let mut reader = File::open(src).map_err(|e| FsError::from_io(e, src))?;
        // create_new gives the exclusive-create guarantee without a
        // check-then-write race.
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dst)
            .map_err(|e| FsError::from_io(e, dst))?;
        io::copy(&mut reader, &mut writer).map_err(|e| FsError::from_io(e, dst))?;

        #[cfg(unix)]
        {
            if let Ok(meta) = reader.metadata() {
                let _ = fs::set_permissions(dst, meta.permissions());
            }
        }
        Ok(())
    }

    fn make_directory(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(e, path))
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        fs::rename(src, dst).map_err(|e| FsError::from_io(e, src))
    }

    fn parent_of(&self, path: &Path) -> PathBuf {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_list_reports_files_and_dirs() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let mut f = File::create(temp.path().join("a.txt")).unwrap();
        f.write_all(b"hello").unwrap();

        let entries = RealFs.list(temp.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_dir);
        assert_eq!(sub.size, None);

        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert!(!file.is_dir);
        assert_eq!(file.size, Some(5));
        assert!(file.modified.is_some());
    }

    #[test]
    fn test_list_missing_dir_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("gone");
        match RealFs.list(&missing) {
            Err(FsError::NotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected NotFound, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        File::create(&file).unwrap();
        assert!(matches!(
            RealFs.list(&file),
            Err(FsError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_copy_file_is_exclusive() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("dst.txt");
        fs::write(&src, b"payload").unwrap();

        RealFs.copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"payload");

        // Second copy must refuse to overwrite.
        assert!(matches!(
            RealFs.copy_file(&src, &dst),
            Err(FsError::AlreadyExists(_))
        ));
        assert_eq!(fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn test_make_directory_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("a/b");
        RealFs.make_directory(&dir).unwrap();
        RealFs.make_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_rename_moves_entry() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("old.txt");
        let dst = temp.path().join("new.txt");
        fs::write(&src, b"x").unwrap();

        RealFs.rename(&src, &dst).unwrap();
        assert!(!src.exists());
        assert!(dst.exists());
    }

    #[test]
    fn test_parent_of_root_is_root() {
        let root = Path::new("/");
        assert_eq!(RealFs.parent_of(root), PathBuf::from("/"));
        assert_eq!(RealFs.parent_of(Path::new("/tmp/x")), PathBuf::from("/tmp"));
    }
}
