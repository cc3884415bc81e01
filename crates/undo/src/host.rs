//! The text-storage side of the undo system.

use scribe_primitives::{Cursor, LineFlags};

use crate::history::ViewSnapshot;

/// Operations the [`UndoManager`](crate::UndoManager) needs from the text
/// storage that owns the lines.
///
/// The query half is used while recording, to capture the pre-edit state of
/// the lines an edit touches. The mutation half is used while replaying an
/// undo or redo. Replay mutations must not be reported back to the manager
/// as new edits; the manager suspends recording for the duration of a
/// replay, and an implementation is free to skip the notifications entirely.
///
/// Replay only ever addresses positions that existed when the item was
/// recorded, so implementations may treat an out-of-range position as a bug
/// (log it and ignore the call).
pub trait UndoHost {
	/// Number of lines in the buffer.
	fn line_count(&self) -> usize;

	/// Length of `line` in characters, `None` past the end of the buffer.
	fn line_len(&self, line: usize) -> Option<usize>;

	/// Modification flags of `line`, `None` past the end of the buffer.
	fn line_flags(&self, line: usize) -> Option<LineFlags>;

	/// Overwrites the modification flags of `line`.
	fn set_line_flags(&mut self, line: usize, flags: LineFlags);

	/// Returns the autowrap hint of `line`.
	fn is_line_autowrapped(&self, line: usize) -> bool;

	/// Cursor state of the active view, `None` if there is no active view.
	fn view_snapshot(&self) -> Option<ViewSnapshot>;

	/// Restores the active view to `snapshot`, placing the primary cursor at
	/// `cursor` when it is set. Does nothing without an active view.
	fn restore_view(&mut self, cursor: Option<Cursor>, snapshot: &ViewSnapshot);

	/// Called before the items of a group are replayed.
	fn begin_replay(&mut self) {}

	/// Called after the items of a group were replayed.
	fn end_replay(&mut self) {}

	/// Inserts `text` (no line breaks) at `line`, `column`.
	fn insert_text(&mut self, line: usize, column: usize, text: &str);

	/// Removes `len` characters at `line`, `column`.
	fn remove_text(&mut self, line: usize, column: usize, len: usize);

	/// Inserts a new line holding `text` at index `line`.
	fn insert_line(&mut self, line: usize, text: &str);

	/// Removes the line at index `line`.
	fn remove_line(&mut self, line: usize);

	/// Splits `line` at `column`.
	///
	/// With `new_line` (or when `line` is the last line) the tail becomes a
	/// new line; otherwise it is prepended to the existing next line.
	fn wrap_line(&mut self, line: usize, column: usize, new_line: bool);

	/// Joins the line after `line` onto `line`.
	///
	/// With `remove_line` the whole next line is appended and removed;
	/// otherwise only its first `len` characters are moved up and the next
	/// line stays.
	fn unwrap_line(&mut self, line: usize, remove_line: bool, len: usize);

	/// Sets the autowrap rendering hint of `line`.
	fn mark_line_autowrapped(&mut self, line: usize, autowrapped: bool);

	/// Sets the document-wide modified flag.
	fn set_modified(&mut self, modified: bool);
}
