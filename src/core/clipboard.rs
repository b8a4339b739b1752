use super::lister::Entry;

/// What a buffered item will do to its source on paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    Copy,
    Cut,
}

/// One item staged for transfer. Identity is `entry.path`.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferEntry {
    pub entry: Entry,
    pub mode: BufferMode,
}

/// Why an add was refused. Both cases leave the buffer untouched and are
/// surfaced as a transient message, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoSelection,
    AlreadyBuffered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(Vec<BufferEntry>),
    Rejected(RejectReason),
}

/// Appends `(entry, mode)` to the buffer, preserving insertion order.
///
/// Rejected when nothing is selected or when the same path is already
/// buffered; a second add of the same path never overwrites the mode.
pub fn add(buffer: &[BufferEntry], selected: Option<&Entry>, mode: BufferMode) -> AddOutcome {
    let Some(entry) = selected else {
        return AddOutcome::Rejected(RejectReason::NoSelection);
    };
    if buffer.iter().any(|item| item.entry.path == entry.path) {
        return AddOutcome::Rejected(RejectReason::AlreadyBuffered);
    }
    let mut next = buffer.to_vec();
    next.push(BufferEntry {
        entry: entry.clone(),
        mode,
    });
    AddOutcome::Added(next)
}

/// The empty buffer. Used after every paste, regardless of outcome.
pub fn clear(_buffer: &[BufferEntry]) -> Vec<BufferEntry> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(path: &str) -> Entry {
        Entry {
            name: PathBuf::from(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: PathBuf::from(path),
            is_dir: false,
            size: Some(0),
            modified: None,
        }
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let buffer = Vec::new();
        let AddOutcome::Added(buffer) = add(&buffer, Some(&entry("/a")), BufferMode::Copy) else {
            panic!("first add rejected");
        };
        let AddOutcome::Added(buffer) = add(&buffer, Some(&entry("/b")), BufferMode::Cut) else {
            panic!("second add rejected");
        };
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].entry.path, PathBuf::from("/a"));
        assert_eq!(buffer[0].mode, BufferMode::Copy);
        assert_eq!(buffer[1].entry.path, PathBuf::from("/b"));
        assert_eq!(buffer[1].mode, BufferMode::Cut);
    }

    #[test]
    fn test_duplicate_path_rejected_and_mode_kept() {
        let AddOutcome::Added(buffer) = add(&[], Some(&entry("/a")), BufferMode::Copy) else {
            panic!("first add rejected");
        };
        // Re-adding the same path as a cut must not flip the mode.
        let outcome = add(&buffer, Some(&entry("/a")), BufferMode::Cut);
        assert_eq!(outcome, AddOutcome::Rejected(RejectReason::AlreadyBuffered));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer[0].mode, BufferMode::Copy);
    }

    #[test]
    fn test_no_selection_rejected() {
        let outcome = add(&[], None, BufferMode::Copy);
        assert_eq!(outcome, AddOutcome::Rejected(RejectReason::NoSelection));
    }

    #[test]
    fn test_clear_empties_buffer() {
        let AddOutcome::Added(buffer) = add(&[], Some(&entry("/a")), BufferMode::Cut) else {
            panic!("add rejected");
        };
        assert!(clear(&buffer).is_empty());
    }
}
