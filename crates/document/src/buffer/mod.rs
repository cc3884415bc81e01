//! Line storage with per-line modification state.
//!
//! [`TextBuffer`] is a plain vector of [`TextLine`]s. Every mutating method
//! applies the same line-state rules the undo recorder uses for redo (see
//! [`scribe_primitives::line_flags`]), so a forward edit and its redo always
//! leave identical flags behind. Columns are measured in characters.


use scribe_primitives::edit::Result;
use scribe_primitives::{EditError, LineFlags, line_flags};

/// One line of text, without its line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
	text: String,
	flags: LineFlags,
	autowrapped: bool,
}

impl TextLine {
	/// A fresh, untouched line.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	fn with_flags(text: impl Into<String>, flags: LineFlags) -> Self {
		Self {
			text: text.into(),
			flags,
			autowrapped: false,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Length in characters.
	pub fn len(&self) -> usize {
		self.text.chars().count()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	pub fn flags(&self) -> LineFlags {
		self.flags
	}

	/// Returns true if the line was wrapped by the view rather than by a
	/// typed line break.
	pub fn is_autowrapped(&self) -> bool {
		self.autowrapped
	}

	fn byte_index(&self, column: usize) -> usize {
		self.text
			.char_indices()
			.nth(column)
			.map_or(self.text.len(), |(idx, _)| idx)
	}
}

/// The lines of a document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
	lines: Vec<TextLine>,
}

impl Default for TextBuffer {
	fn default() -> Self {
		Self::new()
	}
}

impl TextBuffer {
	/// A buffer holding one empty line.
	pub fn new() -> Self {
		Self {
			lines: vec![TextLine::default()],
		}
	}

	/// Splits `text` at `'\n'` into untouched lines.
	///
	/// A trailing line break yields a trailing empty line.
	pub fn from_text(text: &str) -> Self {
		Self {
			lines: text.split('\n').map(TextLine::new).collect(),
		}
	}

	/// The whole content, lines joined with `'\n'`.
	pub fn text(&self) -> String {
		let mut out = String::new();
		for (idx, line) in self.lines.iter().enumerate() {
			if idx > 0 {
				out.push('\n');
			}
			out.push_str(&line.text);
		}
		out
	}

	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	pub fn line(&self, line: usize) -> Option<&TextLine> {
		self.lines.get(line)
	}

	pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
		self.lines.iter()
	}

	/// Length of `line` in characters.
	pub fn line_len(&self, line: usize) -> Option<usize> {
		self.lines.get(line).map(TextLine::len)
	}

	fn check_line(&self, line: usize) -> Result<()> {
		if line < self.lines.len() {
			Ok(())
		} else {
			Err(EditError::LineOutOfRange {
				line,
				lines: self.lines.len(),
			})
		}
	}

	/// Checks that `column` lies within (or at the end of) `line`.
	pub fn check_position(&self, line: usize, column: usize) -> Result<()> {
		self.check_line(line)?;
		let len = self.lines[line].len();
		if column <= len {
			Ok(())
		} else {
			Err(EditError::ColumnOutOfRange { line, column, len })
		}
	}

	/// Checks that `len` characters starting at `column` fit in `line` and
	/// returns the end column.
	fn check_span(&self, line: usize, column: usize, len: usize) -> Result<usize> {
		self.check_line(line)?;
		let end = column
			.checked_add(len)
			.ok_or_else(|| EditError::ColumnOutOfRange {
				line,
				column,
				len: self.lines[line].len(),
			})?;
		self.check_position(line, end)?;
		Ok(end)
	}

	/// Checks that `line` has a successor.
	pub fn check_next_line(&self, line: usize) -> Result<()> {
		self.check_line(line)?;
		if line + 1 < self.lines.len() {
			Ok(())
		} else {
			Err(EditError::NoNextLine { line })
		}
	}

	/// The `len` characters of `line` starting at `column`.
	pub fn slice(&self, line: usize, column: usize, len: usize) -> Result<&str> {
		let end = self.check_span(line, column, len)?;
		let target = &self.lines[line];
		Ok(&target.text[target.byte_index(column)..target.byte_index(end)])
	}

	pub fn set_line_flags(&mut self, line: usize, flags: LineFlags) -> Result<()> {
		self.check_line(line)?;
		self.lines[line].flags = flags;
		Ok(())
	}

	/// Inserts `text` (no line breaks) at `line`, `column`.
	pub fn insert_text(&mut self, line: usize, column: usize, text: &str) -> Result<()> {
		self.check_position(line, column)?;
		if text.contains('\n') {
			return Err(EditError::LineBreak { line });
		}
		if text.is_empty() {
			return Ok(());
		}
		let target = &mut self.lines[line];
		let at = target.byte_index(column);
		target.text.insert_str(at, text);
		target.flags.mark_as_modified(true);
		Ok(())
	}

	/// Removes `len` characters at `line`, `column` and returns them.
	pub fn remove_text(&mut self, line: usize, column: usize, len: usize) -> Result<String> {
		let end = self.check_span(line, column, len)?;
		if len == 0 {
			return Ok(String::new());
		}
		let target = &mut self.lines[line];
		let range = target.byte_index(column)..target.byte_index(end);
		let removed = target.text[range.clone()].to_string();
		target.text.replace_range(range, "");
		target.flags.mark_as_modified(true);
		Ok(removed)
	}

	/// Inserts a new, modified line holding `text` at index `line`.
	pub fn insert_line(&mut self, line: usize, text: &str) -> Result<()> {
		if line > self.lines.len() {
			return Err(EditError::LineOutOfRange {
				line,
				lines: self.lines.len(),
			});
		}
		if text.contains('\n') {
			return Err(EditError::LineBreak { line });
		}
		self.lines
			.insert(line, TextLine::with_flags(text, LineFlags::modified()));
		Ok(())
	}

	/// Removes the line at index `line` and returns it.
	///
	/// Removing the only line leaves a single empty, untouched line behind.
	pub fn remove_line(&mut self, line: usize) -> Result<TextLine> {
		self.check_line(line)?;
		let removed = self.lines.remove(line);
		if self.lines.is_empty() {
			self.lines.push(TextLine::default());
		}
		Ok(removed)
	}

	/// Splits `line` at `column`.
	///
	/// With `new_line`, or when `line` is the last line, the tail becomes a
	/// new line; otherwise it is prepended to the next line. Returns the
	/// number of characters moved.
	pub fn wrap_line(&mut self, line: usize, column: usize, new_line: bool) -> Result<usize> {
		self.check_position(line, column)?;
		let target = &mut self.lines[line];
		let at = target.byte_index(column);
		let tail = target.text.split_off(at);
		let tail_len = tail.chars().count();
		let (head_flags, tail_flags) = line_flags::wrapped(target.flags, column, tail_len);
		target.flags = head_flags;

		if new_line || line + 1 == self.lines.len() {
			self.lines
				.insert(line + 1, TextLine::with_flags(tail, tail_flags));
		} else {
			let next = &mut self.lines[line + 1];
			next.text.insert_str(0, &tail);
			next.flags = tail_flags;
		}
		Ok(tail_len)
	}

	/// Joins the line after `line` onto `line`.
	///
	/// With `remove_line` the whole next line is appended and removed.
	/// Otherwise only its first `len` characters move up.
	pub fn unwrap_line(&mut self, line: usize, remove_line: bool, len: usize) -> Result<()> {
		self.check_next_line(line)?;
		if remove_line {
			let next = self.lines.remove(line + 1);
			let target = &mut self.lines[line];
			target.flags = line_flags::unwrapped(target.len(), next.flags, next.len());
			target.text.push_str(&next.text);
			return Ok(());
		}

		self.check_position(line + 1, len)?;
		if len == 0 {
			return Ok(());
		}
		let next = &mut self.lines[line + 1];
		let at = next.byte_index(len);
		let rest = next.text.split_off(at);
		let head = std::mem::replace(&mut next.text, rest);
		next.flags.mark_as_modified(true);
		let target = &mut self.lines[line];
		target.text.push_str(&head);
		target.flags.mark_as_modified(true);
		Ok(())
	}

	/// Sets the autowrap hint of `line`.
	pub fn mark_line_autowrapped(&mut self, line: usize, autowrapped: bool) -> Result<()> {
		self.check_line(line)?;
		self.lines[line].autowrapped = autowrapped;
		Ok(())
	}

	/// Turns every modified line into a saved one.
	pub fn mark_modified_lines_as_saved(&mut self) {
		for line in &mut self.lines {
			line.flags = line.flags.after_save();
		}
	}

	/// The nearest line at or after (`down`) or at or before `start` that
	/// is modified or saved on disk.
	pub fn find_touched_line(&self, start: usize, down: bool) -> Option<usize> {
		if start >= self.lines.len() {
			return None;
		}
		let touched = |idx: &usize| self.lines[*idx].flags.is_touched();
		if down {
			(start..self.lines.len()).find(touched)
		} else {
			(0..=start).rev().find(touched)
		}
	}
}
