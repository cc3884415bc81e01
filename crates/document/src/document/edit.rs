//! Edit sessions, primitive edits and the composite edits built on them.

use scribe_primitives::edit::Result;
use scribe_primitives::{Cursor, EditError, Range};
use tracing::warn;

use super::Document;
use crate::view::Shift;

impl Document {
	/// Opens an edit session. Sessions nest; the outermost one becomes a
	/// single undo step.
	pub fn edit_start(&mut self) {
		if self.edit_depth == 0 {
			self.edit_changed = false;
			self.undo.edit_start(&self.state);
		}
		self.edit_depth += 1;
	}

	/// Closes an edit session. Closing the outermost session commits the
	/// undo step and marks the document modified if the buffer changed.
	pub fn edit_end(&mut self) {
		let Some(depth) = self.edit_depth.checked_sub(1) else {
			warn!("edit_end without matching edit_start");
			return;
		};
		self.edit_depth = depth;
		if depth > 0 {
			return;
		}
		if self.edit_changed {
			self.set_modified(true);
		}
		self.undo.edit_end(&self.state);
	}

	/// Returns true inside an edit session.
	pub fn is_editing(&self) -> bool {
		self.edit_depth > 0
	}

	fn in_session<T>(&mut self, edit: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.edit_start();
		let result = edit(self);
		self.edit_end();
		result
	}

	fn check_single_line(line: usize, text: &str) -> Result<()> {
		if text.contains('\n') {
			Err(EditError::LineBreak { line })
		} else {
			Ok(())
		}
	}

	/// Inserts `text`, which must not contain line breaks, at `line`,
	/// `column`.
	pub fn edit_insert_text(&mut self, line: usize, column: usize, text: &str) -> Result<()> {
		self.state.buffer.check_position(line, column)?;
		Self::check_single_line(line, text)?;
		if text.is_empty() {
			return Ok(());
		}
		self.in_session(|doc| {
			doc.undo.text_inserted(&doc.state, line, column, text);
			doc.state.buffer.insert_text(line, column, text)?;
			doc.state.shift_view(Shift::Insert {
				at: Cursor::new(line, column),
				len: text.chars().count(),
			});
			doc.edit_changed = true;
			Ok(())
		})
	}

	/// Removes `len` characters at `line`, `column` and returns them.
	pub fn edit_remove_text(&mut self, line: usize, column: usize, len: usize) -> Result<String> {
		let text = self.state.buffer.slice(line, column, len)?.to_string();
		if text.is_empty() {
			return Ok(text);
		}
		self.in_session(|doc| {
			doc.undo.text_removed(&doc.state, line, column, &text);
			doc.state.buffer.remove_text(line, column, len)?;
			doc.state.shift_view(Shift::Remove {
				at: Cursor::new(line, column),
				len,
			});
			doc.edit_changed = true;
			Ok(text)
		})
	}

	/// Inserts a line holding `text` at index `line` (which may equal the
	/// line count to append).
	pub fn edit_insert_line(&mut self, line: usize, text: &str) -> Result<()> {
		let lines = self.line_count();
		if line > lines {
			return Err(EditError::LineOutOfRange { line, lines });
		}
		Self::check_single_line(line, text)?;
		self.in_session(|doc| {
			doc.undo.line_inserted(line, text);
			doc.state.buffer.insert_line(line, text)?;
			doc.state.shift_view(Shift::InsertLine { line });
			doc.edit_changed = true;
			Ok(())
		})
	}

	/// Removes the line at index `line` and returns its text.
	///
	/// The only line of a document cannot go away; its text is removed
	/// instead.
	pub fn edit_remove_line(&mut self, line: usize) -> Result<String> {
		self.state.buffer.check_position(line, 0)?;
		if self.line_count() == 1 {
			let len = self.line_len(0).unwrap_or(0);
			return self.edit_remove_text(0, 0, len);
		}
		let text = self.line(line).unwrap_or_default().to_string();
		self.in_session(|doc| {
			doc.undo.line_removed(&doc.state, line, &text);
			doc.state.buffer.remove_line(line)?;
			doc.state.shift_view(Shift::RemoveLine { line });
			doc.edit_changed = true;
			Ok(text)
		})
	}

	/// Splits `line` at `column`.
	///
	/// With `new_line` (or on the last line) the tail becomes a new line;
	/// otherwise it is prepended to the next line.
	pub fn edit_wrap_line(&mut self, line: usize, column: usize, new_line: bool) -> Result<()> {
		self.state.buffer.check_position(line, column)?;
		let len = self.line_len(line).unwrap_or(0) - column;
		let new_line = new_line || line + 1 == self.line_count();
		self.in_session(|doc| {
			doc.undo.line_wrapped(&doc.state, line, column, len, new_line);
			doc.state.buffer.wrap_line(line, column, new_line)?;
			doc.state.shift_view(Shift::Wrap {
				at: Cursor::new(line, column),
				len,
				new_line,
			});
			doc.edit_changed = true;
			Ok(())
		})
	}

	/// Joins the line after `line` onto `line`.
	pub fn edit_unwrap_line(&mut self, line: usize) -> Result<()> {
		self.state.buffer.check_next_line(line)?;
		let column = self.line_len(line).unwrap_or(0);
		let len = self.line_len(line + 1).unwrap_or(0);
		self.in_session(|doc| {
			doc.undo.line_unwrapped(&doc.state, line, column, len, true);
			doc.state.buffer.unwrap_line(line, true, len)?;
			doc.state.shift_view(Shift::Unwrap {
				line,
				column,
				len,
				line_removed: true,
			});
			doc.edit_changed = true;
			Ok(())
		})
	}

	/// Sets the autowrap hint of `line`. The text is unchanged.
	pub fn edit_mark_line_autowrapped(&mut self, line: usize, autowrapped: bool) -> Result<()> {
		self.state.buffer.check_position(line, 0)?;
		self.in_session(|doc| {
			doc.undo.line_autowrapped_marked(&doc.state, line, autowrapped);
			doc.state.buffer.mark_line_autowrapped(line, autowrapped)
		})
	}

	/// Inserts possibly multi-line `text` at `pos` and returns the position
	/// right after it.
	pub fn insert_text(&mut self, pos: Cursor, text: &str) -> Result<Cursor> {
		self.state.buffer.check_position(pos.line, pos.column)?;
		self.in_session(|doc| {
			let mut end = pos;
			for (idx, segment) in text.split('\n').enumerate() {
				if idx > 0 {
					doc.edit_wrap_line(end.line, end.column, true)?;
					end = Cursor::new(end.line + 1, 0);
				}
				doc.edit_insert_text(end.line, end.column, segment)?;
				end.column += segment.chars().count();
			}
			Ok(end)
		})
	}

	/// Removes the text inside `range`.
	///
	/// A multi-line range is taken apart into removing the head of its last
	/// line, the lines in between and the tail of its first line, followed
	/// by joining the two remaining pieces.
	pub fn remove_text(&mut self, range: Range) -> Result<()> {
		self.check_range(range)?;
		if range.is_empty() {
			return Ok(());
		}
		let Range { start, end } = range;
		self.in_session(|doc| {
			if range.on_single_line() {
				doc.edit_remove_text(start.line, start.column, end.column - start.column)?;
				return Ok(());
			}
			doc.edit_remove_text(end.line, 0, end.column)?;
			for line in (start.line + 1..end.line).rev() {
				doc.edit_remove_line(line)?;
			}
			let tail = doc.line_len(start.line).unwrap_or(0) - start.column;
			doc.edit_remove_text(start.line, start.column, tail)?;
			doc.edit_unwrap_line(start.line)
		})
	}

	/// Inserts one line per `'\n'`-separated segment of `text`, starting at
	/// index `line`.
	pub fn insert_line(&mut self, line: usize, text: &str) -> Result<()> {
		let lines = self.line_count();
		if line > lines {
			return Err(EditError::LineOutOfRange { line, lines });
		}
		self.in_session(|doc| {
			for (offset, segment) in text.split('\n').enumerate() {
				doc.edit_insert_line(line + offset, segment)?;
			}
			Ok(())
		})
	}

	/// Removes the line at index `line`.
	pub fn remove_line(&mut self, line: usize) -> Result<()> {
		self.in_session(|doc| doc.edit_remove_line(line).map(drop))
	}

	/// Replaces the whole content with `text` as a single undo step.
	pub fn set_text(&mut self, text: &str) -> Result<()> {
		let last = self.line_count() - 1;
		let end = Cursor::new(last, self.line_len(last).unwrap_or(0));
		self.in_session(|doc| {
			doc.remove_text(Range::new(Cursor::start(), end))?;
			doc.insert_text(Cursor::start(), text).map(drop)
		})
	}
}
