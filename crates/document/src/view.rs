//! The active view's cursor state and how edits move it.

use scribe_primitives::{Cursor, Range, SecondaryCursor, SecondaryCursors};
use scribe_undo::ViewSnapshot;

use crate::buffer::TextBuffer;

/// A primitive buffer change, as far as positions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shift {
	/// `len` characters inserted at `at`.
	Insert { at: Cursor, len: usize },
	/// `len` characters removed at `at`.
	Remove { at: Cursor, len: usize },
	/// A line inserted at index `line`.
	InsertLine { line: usize },
	/// The line at index `line` removed.
	RemoveLine { line: usize },
	/// `at.line` split at `at.column`; `len` characters moved down.
	Wrap { at: Cursor, len: usize, new_line: bool },
	/// `line + 1` joined onto `line`, whose length was `column`; `len`
	/// characters moved up.
	Unwrap {
		line: usize,
		column: usize,
		len: usize,
		line_removed: bool,
	},
}

impl Shift {
	/// Moves `pos` so it keeps pointing at the same text.
	///
	/// Positions at an insertion point move past the inserted text.
	fn apply(self, pos: &mut Cursor) {
		match self {
			Self::Insert { at, len } => {
				if pos.line == at.line && pos.column >= at.column {
					pos.column += len;
				}
			}
			Self::Remove { at, len } => {
				if pos.line == at.line && pos.column > at.column {
					pos.column = at.column.max(pos.column.saturating_sub(len));
				}
			}
			Self::InsertLine { line } => {
				if pos.line >= line {
					pos.line += 1;
				}
			}
			Self::RemoveLine { line } => {
				if pos.line > line {
					pos.line -= 1;
				} else if pos.line == line {
					pos.column = 0;
				}
			}
			Self::Wrap { at, len, new_line } => {
				if pos.line == at.line && pos.column >= at.column {
					*pos = Cursor::new(at.line + 1, pos.column - at.column);
				} else if pos.line > at.line {
					if new_line {
						pos.line += 1;
					} else if pos.line == at.line + 1 {
						pos.column += len;
					}
				}
			}
			Self::Unwrap {
				line,
				column,
				len,
				line_removed,
			} => {
				if pos.line == line + 1 {
					if line_removed || pos.column < len {
						*pos = Cursor::new(line, column + pos.column);
					} else {
						pos.column -= len;
					}
				} else if pos.line > line + 1 && line_removed {
					pos.line -= 1;
				}
			}
		}
	}
}

/// The cursor, selection and secondary cursors of the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
	cursor: Cursor,
	selection: Option<Range>,
	secondary_cursors: SecondaryCursors,
}

impl View {
	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	pub fn selection(&self) -> Option<Range> {
		self.selection
	}

	pub fn secondary_cursors(&self) -> &[SecondaryCursor] {
		&self.secondary_cursors
	}

	pub(crate) fn set_cursor(&mut self, cursor: Cursor) {
		self.cursor = cursor;
	}

	pub(crate) fn set_selection(&mut self, selection: Option<Range>) {
		self.selection = selection.filter(|range| !range.is_empty());
	}

	pub(crate) fn set_secondary_cursors(&mut self, cursors: SecondaryCursors) {
		self.secondary_cursors = cursors;
	}

	pub(crate) fn snapshot(&self) -> ViewSnapshot {
		ViewSnapshot {
			cursor: Some(self.cursor),
			selection: self.selection,
			secondary_cursors: self.secondary_cursors.clone(),
		}
	}

	/// Restores `snapshot`, with `cursor` overriding its primary cursor.
	///
	/// A snapshot taken without a view carries no cursor; the current one is
	/// kept then. Positions are clamped to `buffer`.
	pub(crate) fn restore(&mut self, cursor: Option<Cursor>, snapshot: &ViewSnapshot, buffer: &TextBuffer) {
		if let Some(cursor) = cursor.or(snapshot.cursor) {
			self.cursor = cursor;
		}
		self.selection = snapshot.selection;
		self.secondary_cursors = snapshot.secondary_cursors.clone();
		self.clamp(buffer);
	}

	pub(crate) fn shift(&mut self, shift: Shift) {
		for pos in self.positions_mut() {
			shift.apply(pos);
		}
	}

	/// Moves every position back inside `buffer`.
	pub(crate) fn clamp(&mut self, buffer: &TextBuffer) {
		for pos in self.positions_mut() {
			*pos = clamp_cursor(buffer, *pos);
		}
		if self.selection.is_some_and(|range| range.is_empty()) {
			self.selection = None;
		}
	}

	fn positions_mut(&mut self) -> impl Iterator<Item = &mut Cursor> {
		let selection = self
			.selection
			.iter_mut()
			.flat_map(|range| [&mut range.start, &mut range.end]);
		let secondary = self
			.secondary_cursors
			.iter_mut()
			.flat_map(|cursor| std::iter::once(&mut cursor.pos).chain(cursor.anchor.as_mut()));
		std::iter::once(&mut self.cursor).chain(selection).chain(secondary)
	}
}

/// The closest valid position to `pos` in `buffer`.
pub(crate) fn clamp_cursor(buffer: &TextBuffer, pos: Cursor) -> Cursor {
	let last = buffer.line_count().saturating_sub(1);
	let line = pos.line.min(last);
	let len = buffer.line_len(line).unwrap_or(0);
	Cursor::new(line, pos.column.min(len))
}
