//! Edit history for a line-oriented text document.
//!
//! The [`UndoManager`] records every primitive buffer mutation reported by
//! the text storage as an [`UndoItem`], collects the items of one
//! `edit_start`/`edit_end` bracket into an [`UndoGroup`], merges compatible
//! adjacent groups, and replays groups backwards and forwards through the
//! [`UndoHost`] trait. Alongside the text it restores the per-line
//! [`LineFlags`](scribe_primitives::LineFlags) captured when each item was
//! recorded, and decides after each undo/redo whether the document is back
//! at its save point.
//!
//! # Architecture
//!
//! ```text
//! UndoManager                         UndoHost (text storage implements)
//! ┌────────────────────┐              ┌─────────────────────────────┐
//! │ undo_stack         │  read flags  │ line_count() / line_len()   │
//! │ redo_stack         │◄────────────►│ line_flags() / set_...()    │
//! │ open_group         │   replay     │ insert_text() / wrap_line() │
//! │ save bookkeeping   │              │ view_snapshot()             │
//! │ reload stash       │              │ restore_view()              │
//! └────────────────────┘              └─────────────────────────────┘
//! ```
//!
//! The storage notifies the manager *before* it applies each primitive edit
//! (`text_inserted`, `line_wrapped`, ...), so the manager can capture the
//! pre-edit line state it needs for an exact inverse.

pub mod config;
pub mod event;
pub mod group;
pub mod history;
pub mod host;
pub mod item;
pub mod manager;
pub mod merge;
pub mod save_state;

#[cfg(test)]
pub(crate) mod test_host;

pub use config::{ConfigError, UndoConfig};
pub use event::{ListenerId, UndoEvent};
pub use group::UndoGroup;
pub use history::{GroupId, ViewSnapshot};
pub use host::UndoHost;
pub use item::{LineModFlags, LineSlot, UndoEdit, UndoItem, UndoKind};
pub use manager::UndoManager;
pub use merge::{MergePolicy, NeverMerge, SameKindMerge};
pub use save_state::SaveStatePattern;
