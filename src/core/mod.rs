pub mod clipboard;
pub mod lister;
pub mod navigation;
pub mod selection;
pub mod transfer;

pub use clipboard::{AddOutcome, BufferEntry, BufferMode, RejectReason};
pub use lister::Entry;
pub use navigation::PaneState;
pub use transfer::{PasteOutcome, TransferError};
