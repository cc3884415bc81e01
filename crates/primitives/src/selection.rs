use smallvec::SmallVec;

use crate::range::{Cursor, Range};

/// A secondary cursor of a multi-cursor view.
///
/// `anchor` is the fixed end of the cursor's selection, if it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondaryCursor {
	/// Position of the cursor itself.
	pub pos: Cursor,
	/// Selection anchor, if the cursor carries a selection.
	pub anchor: Option<Cursor>,
}

impl SecondaryCursor {
	/// A secondary cursor without a selection.
	pub fn at(pos: Cursor) -> Self {
		Self { pos, anchor: None }
	}

	/// A secondary cursor selecting from `anchor` to `pos`.
	pub fn with_anchor(pos: Cursor, anchor: Cursor) -> Self {
		Self {
			pos,
			anchor: Some(anchor),
		}
	}

	/// The selected range, if the cursor has a non-empty selection.
	pub fn range(&self) -> Option<Range> {
		let anchor = self.anchor?;
		let range = Range::new(anchor, self.pos);
		(!range.is_empty()).then_some(range)
	}
}

/// Ordered secondary cursors of a view. Most views have none or one.
pub type SecondaryCursors = SmallVec<[SecondaryCursor; 2]>;
