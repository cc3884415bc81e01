//! Identity and view-state types stored alongside undo groups.

use scribe_primitives::{Cursor, Range, SecondaryCursors};

/// Stable identity of an undo group.
///
/// Groups move between the undo stack, the redo stack and the reload stash,
/// so the save bookkeeping refers to them by id instead of by position.
/// Ids are assigned from a per-manager counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) u64);

impl GroupId {
	/// The raw sequence number.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Snapshot of the active view's cursor state.
///
/// Captured when an undo group opens and when it closes, and restored on
/// undo and redo respectively. A snapshot taken without an active view has
/// no cursor, no selection and no secondary cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
	/// Primary cursor position.
	pub cursor: Option<Cursor>,
	/// Primary selection, if any.
	pub selection: Option<Range>,
	/// Secondary cursors in view order.
	pub secondary_cursors: SecondaryCursors,
}

impl ViewSnapshot {
	/// A snapshot holding only a primary cursor.
	pub fn at(cursor: Cursor) -> Self {
		Self {
			cursor: Some(cursor),
			..Self::default()
		}
	}
}
