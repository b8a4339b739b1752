use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::core::clipboard::{self, AddOutcome, BufferEntry, BufferMode, RejectReason};
use crate::core::navigation::{self, PaneState};
use crate::core::selection;
use crate::core::transfer::{self, TransferError};
use crate::fs::FilesystemPort;

/// How long a status message stays on screen.
const MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneSide {
    Left,
    Right,
}

impl PaneSide {
    pub fn other(self) -> PaneSide {
        match self {
            PaneSide::Left => PaneSide::Right,
            PaneSide::Right => PaneSide::Left,
        }
    }
}

/// Transient status text. The expiry deadline is part of the value, so an
/// expiry check can only ever clear the message it was computed for — a
/// stale timer cannot wipe a newer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    expires_at: Instant,
}

/// Everything the coordinator owns. Pane states are replaced wholesale;
/// nothing in here is shared or aliased.
#[derive(Debug, Clone)]
pub struct AppState {
    pub active: PaneSide,
    pub left: PaneState,
    pub right: PaneState,
    pub buffer: Vec<BufferEntry>,
    pub message: Option<StatusMessage>,
}

/// Dual-pane coordinator: routes commands to the active pane, owns the
/// clipboard buffer, and drives the paste protocol.
pub struct App<F: FilesystemPort> {
    pub fs: F,
    pub state: AppState,
    /// Rows available for entries in each pane; the renderer updates this
    /// from the terminal size before input is handled.
    pub viewport_height: usize,
    pub should_quit: bool,
}

impl<F: FilesystemPort> App<F> {
    /// Opens both panes at their start paths. Listing failures surface as
    /// pane errors, not as startup failures.
    pub fn new(fs: F, left_path: PathBuf, right_path: PathBuf) -> Self {
        let left = navigation::open_directory(&fs, &PaneState::new(left_path.clone()), &left_path);
        let right = navigation::open_directory(&fs, &PaneState::new(right_path.clone()), &right_path);
        App {
            fs,
            state: AppState {
                active: PaneSide::Left,
                left,
                right,
                buffer: Vec::new(),
                message: None,
            },
            viewport_height: 20,
            should_quit: false,
        }
    }

    pub fn pane(&self, side: PaneSide) -> &PaneState {
        match side {
            PaneSide::Left => &self.state.left,
            PaneSide::Right => &self.state.right,
        }
    }

    pub fn active_pane(&self) -> &PaneState {
        self.pane(self.state.active)
    }

    fn replace_pane(&mut self, side: PaneSide, pane: PaneState) {
        match side {
            PaneSide::Left => self.state.left = pane,
            PaneSide::Right => self.state.right = pane,
        }
    }

    fn replace_active_pane(&mut self, pane: PaneState) {
        self.replace_pane(self.state.active, pane);
    }

    pub fn switch_pane(&mut self) {
        self.state.active = self.state.active.other();
    }

    pub fn move_selection_up(&mut self) {
        let next = selection::move_up(self.active_pane(), self.viewport_height);
        self.replace_active_pane(next);
    }

    pub fn move_selection_down(&mut self) {
        let next = selection::move_down(self.active_pane(), self.viewport_height);
        self.replace_active_pane(next);
    }

    pub fn enter_selected(&mut self) {
        let next = navigation::open_selected(&self.fs, self.active_pane());
        self.replace_active_pane(next);
    }

    pub fn go_to_parent(&mut self) {
        let next = navigation::open_parent(&self.fs, self.active_pane());
        self.replace_active_pane(next);
    }

    /// Stages the active pane's selection for a later paste.
    pub fn add_to_buffer(&mut self, mode: BufferMode) {
        let selected = self.active_pane().selected_entry().cloned();
        match clipboard::add(&self.state.buffer, selected.as_ref(), mode) {
            AddOutcome::Added(buffer) => {
                self.state.buffer = buffer;
                let name = selected.map(|e| e.name).unwrap_or_default();
                let verb = match mode {
                    BufferMode::Copy => "Copied",
                    BufferMode::Cut => "Cut",
                };
                self.set_message(format!("{verb} {name} to buffer"));
            }
            AddOutcome::Rejected(RejectReason::NoSelection) => {
                self.set_message("Nothing to add".to_string());
            }
            AddOutcome::Rejected(RejectReason::AlreadyBuffered) => {
                let name = selected.map(|e| e.name).unwrap_or_default();
                self.set_message(format!("{name} already in buffer"));
            }
        }
    }

    /// Paste protocol: run the transfer engine against the active pane's
    /// directory, re-open both panes at their own current cwd (a transfer
    /// may be visible from either side), clear the buffer, and report the
    /// counts. An empty buffer skips everything, including the refresh.
    pub fn paste(&mut self) {
        let dest = self.active_pane().cwd.clone();
        let outcome = match transfer::paste(&self.fs, &self.state.buffer, &dest) {
            Ok(outcome) => outcome,
            Err(TransferError::EmptyBuffer) => {
                self.set_message("Buffer is empty".to_string());
                return;
            }
        };
        info!(
            dest = %dest.display(),
            succeeded = outcome.success_count,
            failed = outcome.failure_count,
            "paste finished"
        );

        for side in [PaneSide::Left, PaneSide::Right] {
            let pane = self.pane(side);
            let cwd = pane.cwd.clone();
            let refreshed = navigation::open_directory(&self.fs, pane, &cwd);
            self.replace_pane(side, refreshed);
        }
        self.state.buffer = clipboard::clear(&self.state.buffer);

        let text = if outcome.failure_count > 0 {
            format!("Pasted {}, {} failed", outcome.success_count, outcome.failure_count)
        } else if outcome.success_count == 1 {
            "Pasted 1 item".to_string()
        } else {
            format!("Pasted {} items", outcome.success_count)
        };
        self.set_message(text);
    }

    pub fn set_message(&mut self, text: String) {
        self.state.message = Some(StatusMessage {
            text,
            expires_at: Instant::now() + MESSAGE_TTL,
        });
    }

    /// Clears the current message once its own deadline has passed.
    pub fn tick(&mut self) {
        if let Some(message) = &self.state.message {
            if Instant::now() >= message.expires_at {
                self.state.message = None;
            }
        }
    }

    pub fn message_text(&self) -> Option<&str> {
        self.state.message.as_ref().map(|m| m.text.as_str())
    }
}
