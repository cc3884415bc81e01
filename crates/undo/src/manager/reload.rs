//! Keeping history across a reload that did not change the content.

use scribe_primitives::Checksum;
use tracing::debug;

use super::UndoManager;
use crate::event::UndoEvent;
use crate::group::UndoGroup;

/// Stacks parked while the storage reloads its content.
#[derive(Debug)]
pub(super) struct ReloadStash {
	undo: Vec<UndoGroup>,
	redo: Vec<UndoGroup>,
	checksum: Option<Checksum>,
}

impl UndoManager {
	/// The storage is about to replace its content.
	///
	/// Both stacks are parked together with `checksum`, the checksum of the
	/// content as last saved or loaded (`None` if unknown or stale).
	pub fn about_to_reload(&mut self, checksum: Option<Checksum>) {
		debug!(
			undo_stack = self.undo_stack.len(),
			redo_stack = self.redo_stack.len(),
			checksum = ?checksum,
			"history parked for reload"
		);
		self.reload_stash = Some(ReloadStash {
			undo: std::mem::take(&mut self.undo_stack),
			redo: std::mem::take(&mut self.redo_stack),
			checksum,
		});
	}

	/// The storage finished loading content with `checksum`.
	///
	/// The parked history comes back only if both checksums are known and
	/// equal. Otherwise it is dropped, since its items describe a different
	/// text. Returns whether the history was restored.
	pub fn loaded(&mut self, checksum: Option<&Checksum>) -> bool {
		let Some(stash) = self.reload_stash.take() else {
			return false;
		};
		let restored = match (&stash.checksum, checksum) {
			(Some(before), Some(after)) => before.matches(after),
			_ => false,
		};
		debug!(
			restored,
			undo_stack = stash.undo.len(),
			redo_stack = stash.redo.len(),
			"reload finished"
		);
		if restored {
			self.undo_stack = stash.undo;
			self.redo_stack = stash.redo;
			self.emit(UndoEvent::Changed);
		}
		restored
	}
}
