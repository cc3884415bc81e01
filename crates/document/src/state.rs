//! The half of a [`Document`](crate::Document) the undo manager replays
//! against.

use scribe_primitives::edit::Result;
use scribe_primitives::{Cursor, LineFlags};
use scribe_undo::{UndoHost, ViewSnapshot};
use tracing::warn;

use crate::buffer::TextBuffer;
use crate::view::{Shift, View};

/// Buffer, active view and modified flag.
///
/// Kept apart from the undo manager so the manager can borrow it mutably
/// while replaying.
#[derive(Debug, Default)]
pub(crate) struct DocumentState {
	pub buffer: TextBuffer,
	pub view: Option<View>,
	pub modified: bool,
}

impl DocumentState {
	pub(crate) fn shift_view(&mut self, shift: Shift) {
		if let Some(view) = &mut self.view {
			view.shift(shift);
		}
	}

	/// Logs a failed replay step. Replay keeps going so the rest of the
	/// group still lands.
	fn replayed<T>(result: Result<T>, op: &'static str) -> Option<T> {
		result
			.inspect_err(|error| warn!(op, %error, "undo replay addressed invalid text"))
			.ok()
	}
}

impl UndoHost for DocumentState {
	fn line_count(&self) -> usize {
		self.buffer.line_count()
	}

	fn line_len(&self, line: usize) -> Option<usize> {
		self.buffer.line_len(line)
	}

	fn line_flags(&self, line: usize) -> Option<LineFlags> {
		self.buffer.line(line).map(|l| l.flags())
	}

	fn set_line_flags(&mut self, line: usize, flags: LineFlags) {
		Self::replayed(self.buffer.set_line_flags(line, flags), "set_line_flags");
	}

	fn is_line_autowrapped(&self, line: usize) -> bool {
		self.buffer.line(line).is_some_and(|l| l.is_autowrapped())
	}

	fn view_snapshot(&self) -> Option<ViewSnapshot> {
		self.view.as_ref().map(View::snapshot)
	}

	fn restore_view(&mut self, cursor: Option<Cursor>, snapshot: &ViewSnapshot) {
		if let Some(view) = &mut self.view {
			view.restore(cursor, snapshot, &self.buffer);
		}
	}

	fn end_replay(&mut self) {
		self.modified = true;
	}

	fn insert_text(&mut self, line: usize, column: usize, text: &str) {
		if Self::replayed(self.buffer.insert_text(line, column, text), "insert_text").is_some() {
			self.shift_view(Shift::Insert {
				at: Cursor::new(line, column),
				len: text.chars().count(),
			});
		}
	}

	fn remove_text(&mut self, line: usize, column: usize, len: usize) {
		if Self::replayed(self.buffer.remove_text(line, column, len), "remove_text").is_some() {
			self.shift_view(Shift::Remove {
				at: Cursor::new(line, column),
				len,
			});
		}
	}

	fn insert_line(&mut self, line: usize, text: &str) {
		if Self::replayed(self.buffer.insert_line(line, text), "insert_line").is_some() {
			self.shift_view(Shift::InsertLine { line });
		}
	}

	fn remove_line(&mut self, line: usize) {
		if Self::replayed(self.buffer.remove_line(line), "remove_line").is_some() {
			self.shift_view(Shift::RemoveLine { line });
		}
	}

	fn wrap_line(&mut self, line: usize, column: usize, new_line: bool) {
		let new_line = new_line || line + 1 == self.buffer.line_count();
		if let Some(len) = Self::replayed(self.buffer.wrap_line(line, column, new_line), "wrap_line") {
			self.shift_view(Shift::Wrap {
				at: Cursor::new(line, column),
				len,
				new_line,
			});
		}
	}

	fn unwrap_line(&mut self, line: usize, remove_line: bool, len: usize) {
		let column = self.buffer.line_len(line).unwrap_or(0);
		let len = if remove_line {
			self.buffer.line_len(line + 1).unwrap_or(0)
		} else {
			len
		};
		if Self::replayed(self.buffer.unwrap_line(line, remove_line, len), "unwrap_line").is_some() {
			self.shift_view(Shift::Unwrap {
				line,
				column,
				len,
				line_removed: remove_line,
			});
		}
	}

	fn mark_line_autowrapped(&mut self, line: usize, autowrapped: bool) {
		Self::replayed(
			self.buffer.mark_line_autowrapped(line, autowrapped),
			"mark_line_autowrapped",
		);
	}

	fn set_modified(&mut self, modified: bool) {
		self.modified = modified;
	}
}
