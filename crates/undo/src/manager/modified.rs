//! Save-point tracking and safe points.

use tracing::{debug, trace};

use super::UndoManager;
use crate::event::UndoEvent;
use crate::host::UndoHost;
use crate::item::TouchedLines;

impl UndoManager {
	/// Records the current stack tops as the save point when `modified` is
	/// false, and closes the current step to merging so later edits stay on
	/// the far side of it. Passing true does nothing.
	pub fn set_modified(&mut self, modified: bool) {
		if modified {
			return;
		}
		let (undo_top, redo_top) = (self.undo_top(), self.redo_top());
		self.saved.record(undo_top, redo_top);
		self.undo_safe_point();
		trace!(?undo_top, ?redo_top, "save point recorded");
	}

	/// Clears the document's modified flag if the stacks are back at the
	/// save point, and blocks merging across it.
	pub(crate) fn update_modified(&mut self, host: &mut impl UndoHost) {
		let pattern = self.saved.pattern(self.undo_top(), self.redo_top());
		let saved = pattern.is_saved();
		debug!(pattern = pattern.bits(), saved, "save pattern resolved");
		if saved {
			host.set_modified(false);
			self.set_modified(false);
		}
	}

	/// Rewrites the line states recorded in the history after a save.
	///
	/// Every recorded "saved" state now refers to an outdated save and
	/// becomes "modified". Then, for each line, the replay step nearest to
	/// the present in either direction is made to restore "saved": the newest
	/// redo state among undo groups and the next undo state among redo
	/// groups.
	pub fn update_line_modifications(&mut self, host: &impl UndoHost) {
		for group in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
			group.flag_saved_as_modified();
		}

		let mut lines = TouchedLines::with_len(host.line_count());
		for group in self.undo_stack.iter_mut().rev() {
			group.mark_redo_as_saved(&mut lines);
		}

		let mut lines = TouchedLines::with_len(host.line_count());
		for group in self.redo_stack.iter_mut().rev() {
			group.mark_undo_as_saved(&mut lines);
		}
		trace!(
			undo_stack = self.undo_stack.len(),
			redo_stack = self.redo_stack.len(),
			"line modifications updated"
		);
	}

	/// Prevents the next group from merging into the current one.
	///
	/// Marks the open group, or the top undo group if no group is open.
	pub fn undo_safe_point(&mut self) {
		if let Some(group) = self.open_group.as_mut().or(self.undo_stack.last_mut()) {
			group.set_safe_point();
		}
	}

	/// The cursor was moved by the user.
	///
	/// Outside an edit this starts a new undo step for the next edit. Moves
	/// made by the edit itself are ignored.
	pub fn cursor_moved(&mut self) {
		if self.open_group.is_some() {
			return;
		}
		self.undo_safe_point();
	}

	/// Drops the undo stack and forgets its save point.
	pub fn clear_undo(&mut self) {
		self.undo_stack.clear();
		self.saved.last_undo_group_when_saved = None;
		self.saved.saved_when_undo_empty = false;
		self.emit(UndoEvent::Changed);
	}

	/// Drops the redo stack and forgets its save point.
	pub fn clear_redo(&mut self) {
		self.redo_stack.clear();
		self.saved.last_redo_group_when_saved = None;
		self.saved.saved_when_redo_empty = false;
		self.emit(UndoEvent::Changed);
	}
}
