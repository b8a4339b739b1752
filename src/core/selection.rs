//! Cursor and scroll arithmetic for one pane.
//!
//! All functions here are pure and total: they take the current pane value
//! and a viewport height and return a new value, maintaining the window
//! invariant `scroll <= selected < scroll + viewport_height` whenever the
//! listing is non-empty.

use super::navigation::PaneState;

/// Moves the cursor up one row. No-op at the top.
pub fn move_up(pane: &PaneState, viewport_height: usize) -> PaneState {
    if pane.selected == 0 {
        return pane.clone();
    }
    let selected = pane.selected - 1;
    PaneState {
        selected,
        scroll: adjust_scroll(selected, pane.scroll, viewport_height),
        ..pane.clone()
    }
}

/// Moves the cursor down one row. No-op at the bottom and on empty listings.
pub fn move_down(pane: &PaneState, viewport_height: usize) -> PaneState {
    if pane.entries.is_empty() || pane.selected + 1 >= pane.entries.len() {
        return pane.clone();
    }
    let selected = pane.selected + 1;
    PaneState {
        selected,
        scroll: adjust_scroll(selected, pane.scroll, viewport_height),
        ..pane.clone()
    }
}

/// Snaps the scroll window so the selection stays visible: to the selection
/// when it moved above the window, to `selected - height + 1` when it moved
/// below (selection becomes the last visible row), unchanged otherwise.
fn adjust_scroll(selected: usize, scroll: usize, viewport_height: usize) -> usize {
    let viewport_height = viewport_height.max(1);
    if selected < scroll {
        selected
    } else if selected >= scroll + viewport_height {
        selected - viewport_height + 1
    } else {
        scroll
    }
}

/// The contiguous run of entries inside the scroll window, clipped to the
/// available length. Pure projection, safe to call every render.
pub fn visible_slice<T>(entries: &[T], scroll: usize, viewport_height: usize) -> &[T] {
    let start = scroll.min(entries.len());
    let end = scroll.saturating_add(viewport_height).min(entries.len());
    &entries[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lister::Entry;
    use std::path::PathBuf;

    fn pane_with(count: usize, selected: usize, scroll: usize) -> PaneState {
        let entries = (0..count)
            .map(|i| Entry {
                name: format!("file{i}.txt"),
                path: PathBuf::from(format!("/d/file{i}.txt")),
                is_dir: false,
                size: Some(0),
                modified: None,
            })
            .collect();
        PaneState {
            cwd: PathBuf::from("/d"),
            entries,
            selected,
            scroll,
            error: None,
        }
    }

    fn assert_window_invariant(pane: &PaneState, viewport: usize) {
        if pane.entries.is_empty() {
            return;
        }
        assert!(pane.selected < pane.entries.len());
        assert!(pane.scroll <= pane.selected, "scroll {} selected {}", pane.scroll, pane.selected);
        assert!(pane.selected < pane.scroll + viewport);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let pane = pane_with(5, 0, 0);
        assert_eq!(move_up(&pane, 3), pane);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let pane = pane_with(5, 4, 2);
        assert_eq!(move_down(&pane, 3), pane);
    }

    #[test]
    fn test_move_down_on_empty_listing_is_noop() {
        let pane = pane_with(0, 0, 0);
        assert_eq!(move_down(&pane, 3), pane);
        assert_eq!(move_up(&pane, 3), pane);
    }

    #[test]
    fn test_move_down_scrolls_window_to_keep_selection_visible() {
        // Five entries, viewport of 3, cursor on the last visible row.
        let pane = pane_with(5, 2, 0);
        let once = move_down(&pane, 3);
        assert_eq!((once.selected, once.scroll), (3, 1));
        let twice = move_down(&once, 3);
        assert_eq!((twice.selected, twice.scroll), (4, 2));
    }

    #[test]
    fn test_move_up_snaps_window_top_to_selection() {
        let pane = pane_with(10, 5, 5);
        let moved = move_up(&pane, 4);
        assert_eq!((moved.selected, moved.scroll), (4, 4));
    }

    #[test]
    fn test_window_invariant_under_arbitrary_moves() {
        let viewport = 4;
        let mut pane = pane_with(12, 0, 0);
        let script = [1, 1, 1, 1, 1, -1, 1, 1, 1, 1, 1, 1, 1, -1, -1, -1, -1, -1, -1, -1, 1];
        for step in script {
            pane = if step > 0 {
                move_down(&pane, viewport)
            } else {
                move_up(&pane, viewport)
            };
            assert_window_invariant(&pane, viewport);
        }
    }

    #[test]
    fn test_visible_slice_clips_to_length() {
        let entries = [1, 2, 3, 4, 5];
        assert_eq!(visible_slice(&entries, 0, 3), &[1, 2, 3]);
        assert_eq!(visible_slice(&entries, 3, 3), &[4, 5]);
        assert_eq!(visible_slice(&entries, 9, 3), &[] as &[i32]);
        assert_eq!(visible_slice(&entries, 0, 99), &[1, 2, 3, 4, 5]);
    }
}
