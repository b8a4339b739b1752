use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{FilesystemPort, FsError, PortEntry};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem port.
///
/// Backs the same contract as `RealFs` with a path-keyed tree, so
/// navigation and transfer behavior can be tested deterministically and
/// without touching real storage. Individual paths can be marked denied to
/// simulate permission failures.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    denied: Mutex<HashSet<PathBuf>>,
}

impl MemoryFs {
    /// Empty filesystem containing only the root directory `/`.
    pub fn new() -> Self {
        let fs = MemoryFs::default();
        fs.lock_nodes().insert(PathBuf::from("/"), Node::Dir);
        fs
    }

    fn lock_nodes(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn lock_denied(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.denied.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Creates a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.lock_nodes();
        for ancestor in ancestors_inclusive(path.as_ref()) {
            nodes.entry(ancestor).or_insert(Node::Dir);
        }
    }

    /// Creates a file with the given contents, parents included.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &[u8]) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.lock_nodes()
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
    }

    /// Marks a path as permission-denied for `list`.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.lock_denied().insert(path.as_ref().to_path_buf());
    }

    /// Removes a path (and its subtree) without going through the port,
    /// for simulating sources that vanish between buffering and paste.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.lock_nodes()
            .retain(|p, _| p != path && !p.starts_with(path));
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.lock_nodes().contains_key(path.as_ref())
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.lock_nodes().get(path.as_ref()) {
            Some(Node::File(data)) => Some(data.clone()),
            _ => None,
        }
    }
}

fn ancestors_inclusive(path: &Path) -> Vec<PathBuf> {
    let mut chain: Vec<PathBuf> = path.ancestors().map(Path::to_path_buf).collect();
    chain.reverse();
    chain
}

impl FilesystemPort for MemoryFs {
    fn list(&self, path: &Path) -> Result<Vec<PortEntry>, FsError> {
        if self.lock_denied().contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        let nodes = self.lock_nodes();
        match nodes.get(path) {
            None => Err(FsError::NotFound(path.to_path_buf())),
            Some(Node::File(_)) => Err(FsError::NotADirectory(path.to_path_buf())),
            Some(Node::Dir) => {
                let mut entries = Vec::new();
                for (child, node) in nodes.range(path.to_path_buf()..) {
                    if child.parent() != Some(path) {
                        if !child.starts_with(path) {
                            break;
                        }
                        continue;
                    }
                    if let Some(name) = child.file_name() {
                        entries.push(PortEntry {
                            name: name.to_string_lossy().to_string(),
                            is_dir: matches!(node, Node::Dir),
                            size: match node {
                                Node::File(data) => Some(data.len() as u64),
                                Node::Dir => None,
                            },
                            modified: None,
                        });
                    }
                }
                Ok(entries)
            }
        }
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let mut nodes = self.lock_nodes();
        let data = match nodes.get(src) {
            None => return Err(FsError::NotFound(src.to_path_buf())),
            Some(Node::Dir) => {
                return Err(FsError::Other {
                    path: src.to_path_buf(),
                    message: "is a directory".to_string(),
                })
            }
            Some(Node::File(data)) => data.clone(),
        };
        if nodes.contains_key(dst) {
            return Err(FsError::AlreadyExists(dst.to_path_buf()));
        }
        match dst.parent() {
            Some(parent) if matches!(nodes.get(parent), Some(Node::Dir)) => {}
            Some(parent) => return Err(FsError::NotFound(parent.to_path_buf())),
            None => return Err(FsError::NotFound(dst.to_path_buf())),
        }
        nodes.insert(dst.to_path_buf(), Node::File(data));
        Ok(())
    }

    fn make_directory(&self, path: &Path) -> Result<(), FsError> {
        let mut nodes = self.lock_nodes();
        for ancestor in ancestors_inclusive(path) {
            match nodes.get(&ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => return Err(FsError::AlreadyExists(ancestor)),
                None => {
                    nodes.insert(ancestor, Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let mut nodes = self.lock_nodes();
        if !nodes.contains_key(src) {
            return Err(FsError::NotFound(src.to_path_buf()));
        }
        // Stricter than POSIX (which would replace a plain file) so that
        // conflict tests are deterministic.
        if nodes.contains_key(dst) {
            return Err(FsError::AlreadyExists(dst.to_path_buf()));
        }
        match dst.parent() {
            Some(parent) if matches!(nodes.get(parent), Some(Node::Dir)) => {}
            Some(parent) => return Err(FsError::NotFound(parent.to_path_buf())),
            None => return Err(FsError::NotFound(dst.to_path_buf())),
        }

        let moved: Vec<(PathBuf, Node)> = nodes
            .iter()
            .filter(|(p, _)| p.as_path() == src || p.starts_with(src))
            .map(|(p, n)| (p.clone(), n.clone()))
            .collect();
        for (p, _) in &moved {
            nodes.remove(p);
        }
        for (p, node) in moved {
            let relocated = match p.strip_prefix(src) {
                Ok(rel) if rel.as_os_str().is_empty() => dst.to_path_buf(),
                Ok(rel) => dst.join(rel),
                Err(_) => continue,
            };
            nodes.insert(relocated, node);
        }
        Ok(())
    }

    fn parent_of(&self, path: &Path) -> PathBuf {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    }
}
