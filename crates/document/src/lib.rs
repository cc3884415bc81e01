//! In-memory text storage wired to the edit history.
//!
//! [`Document`] owns a [`TextBuffer`], an optional active [`View`] and an
//! [`UndoManager`](scribe_undo::UndoManager). Edits are bracketed by edit
//! sessions; every primitive edit is reported to the undo manager before it
//! touches the buffer, and undo/redo replay through the buffer again via
//! [`UndoHost`](scribe_undo::UndoHost).

mod buffer;
mod document;
mod state;
mod view;

pub use buffer::{TextBuffer, TextLine};
pub use document::Document;
pub use view::View;
