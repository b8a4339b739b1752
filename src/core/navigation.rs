use std::path::{Path, PathBuf};

use tracing::debug;

use super::lister::{list_directory, Entry};
use crate::fs::FilesystemPort;

/// Full state of one pane. Replaced wholesale on every navigation, never
/// partially mutated.
///
/// `error` is set only when the most recent navigation attempt failed; in
/// that case `cwd`, `entries`, `selected` and `scroll` all keep their prior
/// values, so the pane never points at a directory it could not list.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneState {
    pub cwd: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub scroll: usize,
    pub error: Option<String>,
}

impl PaneState {
    /// Pane pointed at `cwd` with nothing listed yet; the first
    /// `open_directory` populates it.
    pub fn new(cwd: PathBuf) -> Self {
        PaneState {
            cwd,
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
            error: None,
        }
    }

    /// The entry under the cursor, if any.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }
}

/// Lists `target` and, on success, returns a fresh pane with the cursor and
/// scroll reset. On failure the prior pane is kept with only `error` set:
/// navigation is all-or-nothing.
pub fn open_directory(fs: &dyn FilesystemPort, pane: &PaneState, target: &Path) -> PaneState {
    match list_directory(fs, target) {
        Ok(entries) => PaneState {
            cwd: target.to_path_buf(),
            entries,
            selected: 0,
            scroll: 0,
            error: None,
        },
        Err(err) => {
            debug!(path = %target.display(), %err, "navigation failed");
            PaneState {
                error: Some(err.to_string()),
                ..pane.clone()
            }
        }
    }
}

/// Descends into the selected entry. No-op when nothing is selected or the
/// selection is not a directory.
pub fn open_selected(fs: &dyn FilesystemPort, pane: &PaneState) -> PaneState {
    match pane.selected_entry() {
        Some(entry) if entry.is_dir => {
            let target = entry.path.clone();
            open_directory(fs, pane, &target)
        }
        _ => pane.clone(),
    }
}

/// Ascends to the parent of the current directory. No-op (not an error) when
/// already at the filesystem root.
pub fn open_parent(fs: &dyn FilesystemPort, pane: &PaneState) -> PaneState {
    let parent = fs.parent_of(&pane.cwd);
    if parent == pane.cwd {
        return pane.clone();
    }
    open_directory(fs, pane, &parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::MemoryFs;

    fn sample_fs() -> MemoryFs {
        let fs = MemoryFs::new();
        fs.add_dir("/home/user/projects");
        fs.add_file("/home/user/readme.md", b"hi");
        fs.add_file("/home/user/projects/main.rs", b"fn main() {}");
        fs
    }

    #[test]
    fn test_open_directory_resets_cursor_and_scroll() {
        let fs = sample_fs();
        let mut pane = PaneState::new(PathBuf::from("/home"));
        pane.selected = 7;
        pane.scroll = 4;

        let opened = open_directory(&fs, &pane, Path::new("/home/user"));
        assert_eq!(opened.cwd, PathBuf::from("/home/user"));
        assert_eq!(opened.selected, 0);
        assert_eq!(opened.scroll, 0);
        assert_eq!(opened.error, None);
        assert_eq!(opened.entries.len(), 2);
    }

    #[test]
    fn test_open_directory_failure_keeps_prior_state() {
        let fs = sample_fs();
        let mut pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/home/user"));
        pane.selected = 1;
        pane.scroll = 1;

        let failed = open_directory(&fs, &pane, Path::new("/home/ghost"));
        assert_eq!(failed.cwd, pane.cwd);
        assert_eq!(failed.entries, pane.entries);
        assert_eq!(failed.selected, 1);
        assert_eq!(failed.scroll, 1);
        assert!(failed.error.is_some());
    }

    #[test]
    fn test_open_directory_permission_denied_surfaces_error() {
        let fs = sample_fs();
        fs.deny("/home/user/projects");
        let pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/home/user"));

        let failed = open_directory(&fs, &pane, Path::new("/home/user/projects"));
        assert_eq!(failed.cwd, PathBuf::from("/home/user"));
        let message = failed.error.unwrap();
        assert!(message.contains("permission denied"), "{message}");
    }

    #[test]
    fn test_open_selected_descends_into_directory() {
        let fs = sample_fs();
        let pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/home/user"));
        // Sorted listing puts the directory first.
        assert_eq!(pane.selected_entry().map(|e| e.name.as_str()), Some("projects"));

        let opened = open_selected(&fs, &pane);
        assert_eq!(opened.cwd, PathBuf::from("/home/user/projects"));
        assert_eq!(opened.selected, 0);
    }

    #[test]
    fn test_open_selected_is_noop_on_file() {
        let fs = sample_fs();
        let mut pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/home/user"));
        pane.selected = 1; // readme.md

        let unchanged = open_selected(&fs, &pane);
        assert_eq!(unchanged, pane);
    }

    #[test]
    fn test_open_selected_is_noop_on_empty_listing() {
        let fs = MemoryFs::new();
        fs.add_dir("/empty");
        let pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/empty"));

        let unchanged = open_selected(&fs, &pane);
        assert_eq!(unchanged, pane);
    }

    #[test]
    fn test_open_parent_ascends() {
        let fs = sample_fs();
        let pane = open_directory(&fs, &PaneState::new(PathBuf::from("/")), Path::new("/home/user/projects"));

        let parent = open_parent(&fs, &pane);
        assert_eq!(parent.cwd, PathBuf::from("/home/user"));
    }

    #[test]
    fn test_open_parent_at_root_is_noop() {
        let fs = sample_fs();
        let pane = open_directory(&fs, &PaneState::new(PathBuf::from("/home")), Path::new("/"));

        let unchanged = open_parent(&fs, &pane);
        assert_eq!(unchanged, pane);
    }
}
