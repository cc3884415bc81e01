//! Turning storage notifications into undo items.
//!
//! Every notification arrives before the storage applies the edit, so the
//! host still shows the pre-edit line states captured here.

use scribe_primitives::{LineFlags, line_flags};
use tracing::{trace, warn};

use super::UndoManager;
use crate::event::UndoEvent;
use crate::group::UndoGroup;
use crate::history::GroupId;
use crate::host::UndoHost;
use crate::item::{LineModFlags, LineSlot, UndoEdit, UndoItem};

/// Undo state of a line that is about to change: its modified state if
/// modified, otherwise saved.
fn modified_or_saved(state: LineFlags) -> LineFlags {
	if state.is_modified() {
		LineFlags::modified()
	} else {
		LineFlags::saved()
	}
}

impl UndoManager {
	/// Opens an undo group, capturing the view state as its "before".
	///
	/// Does nothing while recording is suspended.
	///
	/// # Panics
	///
	/// Panics if a group is already open.
	pub fn edit_start(&mut self, host: &impl UndoHost) {
		if !self.active {
			return;
		}
		assert!(self.open_group.is_none(), "nested edit_start");

		let id = GroupId(self.next_group_id);
		self.next_group_id += 1;
		let before = host.view_snapshot().unwrap_or_default();
		self.open_group = Some(UndoGroup::new(id, before));
	}

	/// Closes the open group and commits it.
	///
	/// An empty group is discarded. Otherwise it is merged into the top undo
	/// group when allowed, or pushed as a new step.
	///
	/// # Panics
	///
	/// Panics if no group is open while recording is active.
	pub fn edit_end(&mut self, host: &impl UndoHost) {
		if !self.active {
			return;
		}
		let Some(mut group) = self.open_group.take() else {
			panic!("edit_end without edit_start");
		};
		group.finish(host.view_snapshot());

		if group.is_empty() {
			trace!(group = group.id().get(), "empty undo group discarded");
			return;
		}

		let mergeable = self
			.undo_stack
			.last()
			.is_some_and(|top| self.can_merge(top, &group));
		if mergeable && let Some(top) = self.undo_stack.last_mut() {
			trace!(
				into = top.id().get(),
				group = group.id().get(),
				items = group.len(),
				"undo group merged"
			);
			top.absorb(group);
		} else {
			trace!(
				group = group.id().get(),
				items = group.len(),
				undo_stack = self.undo_stack.len() + 1,
				"undo group pushed"
			);
			self.undo_stack.push(group);
		}
		self.emit(UndoEvent::Changed);
	}

	fn can_merge(&self, top: &UndoGroup, next: &UndoGroup) -> bool {
		if top.is_safe_point() || next.is_safe_point() {
			return false;
		}
		self.allow_complex_merge || self.merge_policy.can_merge(top, next)
	}

	fn add_item(&mut self, item: UndoItem) {
		let Some(group) = &mut self.open_group else {
			return;
		};
		group.add_item(item);
		if !self.redo_stack.is_empty() {
			trace!(cleared = self.redo_stack.len(), "redo stack cleared");
			self.redo_stack.clear();
		}
	}

	fn recording(&self) -> bool {
		self.open_group.is_some()
	}

	fn line_state(host: &impl UndoHost, line: usize) -> LineFlags {
		host.line_flags(line).unwrap_or_else(|| {
			warn!(line, lines = host.line_count(), "edit reported past end of buffer");
			LineFlags::empty()
		})
	}

	/// `text` is about to be inserted at `line`, `column`.
	pub fn text_inserted(&mut self, host: &impl UndoHost, line: usize, column: usize, text: &str) {
		if !self.recording() || text.is_empty() {
			return;
		}
		let state = Self::line_state(host, line);
		let flags = LineModFlags::empty()
			.with(LineSlot::Redo1, LineFlags::modified())
			.with(LineSlot::Undo1, modified_or_saved(state));
		self.add_item(UndoItem::new(
			UndoEdit::InsertText {
				line,
				column,
				text: text.to_string(),
			},
			flags,
		));
	}

	/// `text` is about to be removed from `line`, starting at `column`.
	pub fn text_removed(&mut self, host: &impl UndoHost, line: usize, column: usize, text: &str) {
		if !self.recording() || text.is_empty() {
			return;
		}
		let state = Self::line_state(host, line);
		let flags = LineModFlags::empty()
			.with(LineSlot::Redo1, LineFlags::modified())
			.with(LineSlot::Undo1, modified_or_saved(state));
		self.add_item(UndoItem::new(
			UndoEdit::RemoveText {
				line,
				column,
				text: text.to_string(),
			},
			flags,
		));
	}

	/// A line holding `text` is about to be inserted at index `line`.
	pub fn line_inserted(&mut self, line: usize, text: &str) {
		if !self.recording() {
			return;
		}
		self.add_item(UndoItem::new(
			UndoEdit::InsertLine {
				line,
				text: text.to_string(),
			},
			LineModFlags::REDO_LINE1_MODIFIED,
		));
	}

	/// The line at index `line`, holding `text`, is about to be removed.
	pub fn line_removed(&mut self, host: &impl UndoHost, line: usize, text: &str) {
		if !self.recording() {
			return;
		}
		let state = Self::line_state(host, line);
		let flags = LineModFlags::empty()
			.with(LineSlot::Redo1, LineFlags::modified())
			.with(LineSlot::Undo1, modified_or_saved(state));
		self.add_item(UndoItem::new(
			UndoEdit::RemoveLine {
				line,
				text: text.to_string(),
			},
			flags,
		));
	}

	/// `line` is about to be split at `column`, moving `len` characters to
	/// the next line. `new_line` is true if a line will be created for them.
	pub fn line_wrapped(
		&mut self,
		host: &impl UndoHost,
		line: usize,
		column: usize,
		len: usize,
		new_line: bool,
	) {
		if !self.recording() {
			return;
		}
		let state = Self::line_state(host, line);
		let (head, tail) = line_flags::wrapped(state, column, len);
		let undo = if state.is_modified() {
			LineFlags::modified()
		} else if (len > 0 && column > 0) || state.is_saved_on_disk() {
			LineFlags::saved()
		} else {
			LineFlags::empty()
		};
		let flags = LineModFlags::empty()
			.with(LineSlot::Redo1, head)
			.with(LineSlot::Redo2, tail)
			.with(LineSlot::Undo1, undo);
		self.add_item(UndoItem::new(
			UndoEdit::WrapLine {
				line,
				column,
				len,
				new_line,
			},
			flags,
		));
	}

	/// The line after `line` is about to be joined onto it at `column`.
	///
	/// `len` characters move up; `line_removed` is true if the next line
	/// will be removed afterwards.
	pub fn line_unwrapped(
		&mut self,
		host: &impl UndoHost,
		line: usize,
		column: usize,
		len: usize,
		line_removed: bool,
	) {
		if !self.recording() {
			return;
		}
		let first = Self::line_state(host, line);
		let second = Self::line_state(host, line + 1);
		let first_len = host.line_len(line).unwrap_or(0);
		let second_len = host.line_len(line + 1).unwrap_or(0);

		let (undo1, undo2) = if first_len > 0 && second_len > 0 {
			(modified_or_saved(first), modified_or_saved(second))
		} else if first_len == 0 {
			(modified_or_saved(first), second)
		} else {
			(first, modified_or_saved(second))
		};
		let flags = LineModFlags::empty()
			.with(LineSlot::Redo1, line_flags::unwrapped(first_len, second, second_len))
			.with(LineSlot::Undo1, undo1)
			.with(LineSlot::Undo2, undo2);
		self.add_item(UndoItem::new(
			UndoEdit::UnwrapLine {
				line,
				column,
				len,
				line_removed,
			},
			flags,
		));
	}

	/// The autowrap hint of `line` is about to change to `autowrapped`.
	pub fn line_autowrapped_marked(&mut self, host: &impl UndoHost, line: usize, autowrapped: bool) {
		if !self.recording() {
			return;
		}
		let previous = host.is_line_autowrapped(line);
		self.add_item(UndoItem::new(
			UndoEdit::MarkLineAutowrapped {
				line,
				autowrapped,
				previous,
			},
			LineModFlags::empty(),
		));
	}
}
