//! One user-visible undo step.


use scribe_primitives::Cursor;

use crate::history::{GroupId, ViewSnapshot};
use crate::host::UndoHost;
use crate::item::{TouchedLines, UndoItem, UndoKind};

/// The items recorded between an outermost `edit_start`/`edit_end` pair,
/// plus the view state around them.
///
/// Undo replays the items in reverse order and restores the view as it was
/// when the group opened; redo replays them forwards and restores the view
/// as it was when the group closed.
#[derive(Debug, Clone)]
pub struct UndoGroup {
	id: GroupId,
	items: Vec<UndoItem>,
	before: ViewSnapshot,
	after: ViewSnapshot,
	undo_cursor: Option<Cursor>,
	redo_cursor: Option<Cursor>,
	safe_point: bool,
}

impl UndoGroup {
	pub(crate) fn new(id: GroupId, before: ViewSnapshot) -> Self {
		Self {
			id,
			items: Vec::new(),
			after: before.clone(),
			before,
			undo_cursor: None,
			redo_cursor: None,
			safe_point: false,
		}
	}

	/// Stable identity of the group.
	pub fn id(&self) -> GroupId {
		self.id
	}

	/// Recorded items, oldest first.
	pub fn items(&self) -> &[UndoItem] {
		&self.items
	}

	/// Number of recorded items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true if the group recorded nothing.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// View state captured when the group opened.
	pub fn before(&self) -> &ViewSnapshot {
		&self.before
	}

	/// View state captured when the group closed.
	pub fn after(&self) -> &ViewSnapshot {
		&self.after
	}

	/// Cursor override applied after undoing the group.
	pub fn undo_cursor(&self) -> Option<Cursor> {
		self.undo_cursor
	}

	/// Cursor override applied after redoing the group.
	pub fn redo_cursor(&self) -> Option<Cursor> {
		self.redo_cursor
	}

	pub(crate) fn set_cursors(&mut self, undo: Cursor, redo: Cursor) {
		self.undo_cursor = Some(undo);
		self.redo_cursor = Some(redo);
	}

	/// Returns true if later groups must not merge into this one.
	pub fn is_safe_point(&self) -> bool {
		self.safe_point
	}

	pub(crate) fn set_safe_point(&mut self) {
		self.safe_point = true;
	}

	/// Appends `item`, folding it into the last item when possible.
	///
	/// Items whose replay would do nothing are dropped.
	pub(crate) fn add_item(&mut self, item: UndoItem) {
		if item.is_empty() {
			return;
		}
		if let Some(last) = self.items.last_mut()
			&& last.merge_with(&item)
		{
			return;
		}
		self.items.push(item);
	}

	pub(crate) fn finish(&mut self, after: Option<ViewSnapshot>) {
		if let Some(after) = after {
			self.after = after;
		}
	}

	/// The kind shared by every item, `None` if empty or mixed.
	pub fn single_kind(&self) -> Option<UndoKind> {
		let kind = self.items.first()?.kind();
		self.is_only_kind(kind).then_some(kind)
	}

	/// Returns true if the group is non-empty and holds only `kind` items.
	pub fn is_only_kind(&self, kind: UndoKind) -> bool {
		!self.items.is_empty() && self.items.iter().all(|item| item.kind() == kind)
	}

	/// Folds `next` into this group.
	///
	/// The items are appended (merging at the seam where possible) and the
	/// post-edit view state is taken from `next`, so redo lands where the
	/// later edit left off while undo still returns to where this one began.
	pub(crate) fn absorb(&mut self, next: UndoGroup) {
		for item in next.items {
			self.add_item(item);
		}
		self.after = next.after;
		self.redo_cursor = next.redo_cursor;
	}

	pub(crate) fn undo(&self, host: &mut impl UndoHost) {
		for item in self.items.iter().rev() {
			item.undo(host);
		}
		host.restore_view(self.undo_cursor, &self.before);
	}

	pub(crate) fn redo(&self, host: &mut impl UndoHost) {
		for item in &self.items {
			item.redo(host);
		}
		host.restore_view(self.redo_cursor, &self.after);
	}

	pub(crate) fn flag_saved_as_modified(&mut self) {
		for item in &mut self.items {
			item.flag_saved_as_modified();
		}
	}

	/// Newest item first, since the newest edit of a line defines its saved
	/// redo state.
	pub(crate) fn mark_redo_as_saved(&mut self, lines: &mut TouchedLines) {
		for item in self.items.iter_mut().rev() {
			item.mark_redo_as_saved(lines);
		}
	}

	/// Oldest item first, since the oldest item is the next one undone
	/// after the group is redone.
	pub(crate) fn mark_undo_as_saved(&mut self, lines: &mut TouchedLines) {
		for item in &mut self.items {
			item.mark_undo_as_saved(lines);
		}
	}
}
