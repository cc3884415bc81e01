//! In-memory [`UndoHost`] used by the unit tests of this crate.

use scribe_primitives::{Cursor, LineFlags};

use crate::history::ViewSnapshot;
use crate::host::UndoHost;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Line {
	pub text: String,
	pub flags: LineFlags,
	pub autowrapped: bool,
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
	pub lines: Vec<Line>,
	pub view: Option<ViewSnapshot>,
	pub modified: bool,
	pub replays: usize,
}

fn byte_at(text: &str, column: usize) -> usize {
	text.char_indices()
		.nth(column)
		.map_or(text.len(), |(idx, _)| idx)
}

impl TestHost {
	pub fn with_lines(lines: &[&str]) -> Self {
		Self {
			lines: lines
				.iter()
				.map(|text| Line {
					text: (*text).to_string(),
					..Line::default()
				})
				.collect(),
			..Self::default()
		}
	}

	pub fn texts(&self) -> Vec<&str> {
		self.lines.iter().map(|line| line.text.as_str()).collect()
	}

	pub fn flags(&self, line: usize) -> LineFlags {
		self.lines[line].flags
	}
}

impl UndoHost for TestHost {
	fn line_count(&self) -> usize {
		self.lines.len()
	}

	fn line_len(&self, line: usize) -> Option<usize> {
		self.lines.get(line).map(|l| l.text.chars().count())
	}

	fn line_flags(&self, line: usize) -> Option<LineFlags> {
		self.lines.get(line).map(|l| l.flags)
	}

	fn set_line_flags(&mut self, line: usize, flags: LineFlags) {
		self.lines[line].flags = flags;
	}

	fn is_line_autowrapped(&self, line: usize) -> bool {
		self.lines.get(line).is_some_and(|l| l.autowrapped)
	}

	fn view_snapshot(&self) -> Option<ViewSnapshot> {
		self.view.clone()
	}

	fn restore_view(&mut self, cursor: Option<Cursor>, snapshot: &ViewSnapshot) {
		if let Some(view) = &mut self.view {
			*view = snapshot.clone();
			if cursor.is_some() {
				view.cursor = cursor;
			}
		}
	}

	fn end_replay(&mut self) {
		self.replays += 1;
		self.modified = true;
	}

	fn insert_text(&mut self, line: usize, column: usize, text: &str) {
		let target = &mut self.lines[line].text;
		let at = byte_at(target, column);
		target.insert_str(at, text);
	}

	fn remove_text(&mut self, line: usize, column: usize, len: usize) {
		let target = &mut self.lines[line].text;
		let start = byte_at(target, column);
		let end = byte_at(target, column + len);
		target.replace_range(start..end, "");
	}

	fn insert_line(&mut self, line: usize, text: &str) {
		self.lines.insert(
			line,
			Line {
				text: text.to_string(),
				..Line::default()
			},
		);
	}

	fn remove_line(&mut self, line: usize) {
		self.lines.remove(line);
	}

	fn wrap_line(&mut self, line: usize, column: usize, new_line: bool) {
		let at = byte_at(&self.lines[line].text, column);
		let tail = self.lines[line].text.split_off(at);
		if new_line || line + 1 == self.lines.len() {
			self.lines.insert(
				line + 1,
				Line {
					text: tail,
					..Line::default()
				},
			);
		} else {
			self.lines[line + 1].text.insert_str(0, &tail);
		}
	}

	fn unwrap_line(&mut self, line: usize, remove_line: bool, len: usize) {
		if remove_line {
			let next = self.lines.remove(line + 1);
			self.lines[line].text.push_str(&next.text);
		} else {
			let next = &mut self.lines[line + 1].text;
			let at = byte_at(next, len);
			let rest = next.split_off(at);
			let head = std::mem::replace(next, rest);
			self.lines[line].text.push_str(&head);
		}
	}

	fn mark_line_autowrapped(&mut self, line: usize, autowrapped: bool) {
		self.lines[line].autowrapped = autowrapped;
	}

	fn set_modified(&mut self, modified: bool) {
		self.modified = modified;
	}
}
