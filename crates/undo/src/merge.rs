//! Policies deciding whether a finished group folds into the previous one.
//!
//! The manager only consults a policy when neither group is a safe point and
//! complex merging is disabled; see [`UndoManager::set_allow_complex_merge`].
//! Merging never affects correctness, because every item stays individually
//! invertible. It only changes how many steps the user has to undo.
//!
//! [`UndoManager::set_allow_complex_merge`]: crate::UndoManager::set_allow_complex_merge

use std::fmt;

use crate::group::UndoGroup;

/// Decides whether `next` may be merged into `top`, the group currently on
/// top of the undo stack.
pub trait MergePolicy: fmt::Debug {
	/// Returns true if `next` should be folded into `top`.
	fn can_merge(&self, top: &UndoGroup, next: &UndoGroup) -> bool;
}

/// Merges groups made of a single, identical kind of edit.
///
/// Consecutive typing produces one `InsertText` group per keystroke; those
/// collapse into a single step. A group mixing kinds (say, typing a newline,
/// which inserts text and wraps a line) never merges under this policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameKindMerge;

impl MergePolicy for SameKindMerge {
	fn can_merge(&self, top: &UndoGroup, next: &UndoGroup) -> bool {
		match top.single_kind() {
			Some(kind) => next.is_only_kind(kind),
			None => false,
		}
	}
}

/// Keeps every group as its own undo step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverMerge;

impl MergePolicy for NeverMerge {
	fn can_merge(&self, _top: &UndoGroup, _next: &UndoGroup) -> bool {
		false
	}
}
