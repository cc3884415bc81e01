//! Deciding whether an undo or redo returned the document to its save point.
//!
//! When the document is saved, the manager remembers which groups were on
//! top of the two stacks and whether each stack was empty. After every undo
//! or redo it compares that record with the current stack tops, producing a
//! [`SaveStatePattern`]. A fixed table lists the patterns that mean "the
//! buffer is back to what was saved".


use crate::history::GroupId;

/// Observation of the stacks relative to the last save.
///
/// Top-of-stack comparisons treat "no group" as a value: an empty stack and
/// an unset saved reference compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SaveStatePattern {
	/// The undo stack is empty.
	pub undo_empty: bool,
	/// The redo stack is empty.
	pub redo_empty: bool,
	/// The undo stack was empty when the document was saved.
	pub saved_when_undo_empty: bool,
	/// The redo stack was empty when the document was saved.
	pub saved_when_redo_empty: bool,
	/// The undo top at save time is the current undo top.
	pub last_undo_saved_is_undo_top: bool,
	/// The undo top at save time is the current redo top.
	pub last_undo_saved_is_redo_top: bool,
	/// The redo top at save time is the current undo top.
	pub last_redo_saved_is_undo_top: bool,
	/// The redo top at save time is the current redo top.
	pub last_redo_saved_is_redo_top: bool,
}

const NONE: SaveStatePattern = SaveStatePattern {
	undo_empty: false,
	redo_empty: false,
	saved_when_undo_empty: false,
	saved_when_redo_empty: false,
	last_undo_saved_is_undo_top: false,
	last_undo_saved_is_redo_top: false,
	last_redo_saved_is_undo_top: false,
	last_redo_saved_is_redo_top: false,
};

/// Builds a pattern with exactly the named fields set.
macro_rules! pattern {
	($($field:ident),* $(,)?) => {
		SaveStatePattern {
			$($field: true,)*
			..NONE
		}
	};
}

/// Every pattern that means the document matches its last save.
pub(crate) const SAVED_PATTERNS: [SaveStatePattern; 13] = [
	pattern!(undo_empty, saved_when_undo_empty),
	pattern!(last_undo_saved_is_undo_top),
	pattern!(undo_empty, saved_when_undo_empty, last_undo_saved_is_undo_top),
	pattern!(saved_when_redo_empty, last_undo_saved_is_undo_top),
	pattern!(redo_empty, saved_when_redo_empty, last_undo_saved_is_undo_top),
	pattern!(saved_when_redo_empty, last_undo_saved_is_undo_top, last_redo_saved_is_undo_top),
	pattern!(
		redo_empty,
		saved_when_redo_empty,
		last_undo_saved_is_undo_top,
		last_redo_saved_is_undo_top,
	),
	pattern!(
		undo_empty,
		saved_when_undo_empty,
		saved_when_redo_empty,
		last_undo_saved_is_undo_top,
		last_redo_saved_is_undo_top,
	),
	pattern!(undo_empty, saved_when_undo_empty, last_redo_saved_is_redo_top),
	pattern!(last_undo_saved_is_undo_top, last_redo_saved_is_redo_top),
	pattern!(
		undo_empty,
		saved_when_undo_empty,
		last_undo_saved_is_undo_top,
		last_redo_saved_is_redo_top,
	),
	pattern!(
		redo_empty,
		saved_when_redo_empty,
		last_undo_saved_is_undo_top,
		last_redo_saved_is_redo_top,
	),
	pattern!(
		undo_empty,
		saved_when_undo_empty,
		last_undo_saved_is_redo_top,
		last_redo_saved_is_redo_top,
	),
];

impl SaveStatePattern {
	/// Returns true if this pattern means the document matches its save.
	pub fn is_saved(&self) -> bool {
		SAVED_PATTERNS.contains(self)
	}

	/// Packs the pattern into one byte, `undo_empty` in the lowest bit.
	pub fn bits(&self) -> u8 {
		[
			self.undo_empty,
			self.redo_empty,
			self.saved_when_undo_empty,
			self.saved_when_redo_empty,
			self.last_undo_saved_is_undo_top,
			self.last_undo_saved_is_redo_top,
			self.last_redo_saved_is_undo_top,
			self.last_redo_saved_is_redo_top,
		]
		.iter()
		.enumerate()
		.fold(0, |acc, (bit, set)| acc | (u8::from(*set) << bit))
	}
}

/// What the stacks looked like at the last save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SaveBookkeeping {
	pub last_undo_group_when_saved: Option<GroupId>,
	pub last_redo_group_when_saved: Option<GroupId>,
	pub saved_when_undo_empty: bool,
	pub saved_when_redo_empty: bool,
}

impl Default for SaveBookkeeping {
	/// A fresh document counts as saved with both stacks empty.
	fn default() -> Self {
		Self {
			last_undo_group_when_saved: None,
			last_redo_group_when_saved: None,
			saved_when_undo_empty: true,
			saved_when_redo_empty: true,
		}
	}
}

impl SaveBookkeeping {
	/// Records the current stack tops as the save point.
	///
	/// A reference is only overwritten when its stack is non-empty; the
	/// emptiness flags always reflect the present.
	pub(crate) fn record(&mut self, undo_top: Option<GroupId>, redo_top: Option<GroupId>) {
		if undo_top.is_some() {
			self.last_undo_group_when_saved = undo_top;
		}
		if redo_top.is_some() {
			self.last_redo_group_when_saved = redo_top;
		}
		self.saved_when_undo_empty = undo_top.is_none();
		self.saved_when_redo_empty = redo_top.is_none();
	}

	/// Compares the save-time record against the current stack tops.
	pub(crate) fn pattern(
		&self,
		undo_top: Option<GroupId>,
		redo_top: Option<GroupId>,
	) -> SaveStatePattern {
		SaveStatePattern {
			undo_empty: undo_top.is_none(),
			redo_empty: redo_top.is_none(),
			saved_when_undo_empty: self.saved_when_undo_empty,
			saved_when_redo_empty: self.saved_when_redo_empty,
			last_undo_saved_is_undo_top: self.last_undo_group_when_saved == undo_top,
			last_undo_saved_is_redo_top: self.last_undo_group_when_saved == redo_top,
			last_redo_saved_is_undo_top: self.last_redo_group_when_saved == undo_top,
			last_redo_saved_is_redo_top: self.last_redo_group_when_saved == redo_top,
		}
	}
}
