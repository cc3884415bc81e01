//! Saving and reloading.

use scribe_primitives::Checksum;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::Document;
use crate::buffer::TextBuffer;

/// SHA-256 of `text`.
pub(super) fn checksum_of(text: &str) -> Checksum {
	Checksum::from_bytes(Sha256::digest(text.as_bytes()).to_vec())
}

impl Document {
	/// Marks the current content as written to disk and returns it.
	///
	/// Modified lines become saved lines, the current undo step stops
	/// accepting merges, and the history on both sides of this point is
	/// re-flagged so undo and redo report line state relative to the new
	/// save.
	pub fn save(&mut self) -> String {
		let text = self.text();
		self.state.buffer.mark_modified_lines_as_saved();
		self.undo.update_line_modifications(&self.state);
		let checksum = checksum_of(&text);
		debug!(%checksum, lines = self.line_count(), "document saved");
		self.checksum = Some(checksum);
		self.set_modified(false);
		text
	}

	/// Replaces the content with `text` as loaded from disk.
	///
	/// The history survives only if the document was unmodified and the
	/// new content has the same checksum as the content it replaces.
	/// Returns true if the history was kept. Refused inside an edit
	/// session.
	pub fn reload(&mut self, text: &str) -> bool {
		if self.edit_depth > 0 {
			warn!(depth = self.edit_depth, "reload requested inside an edit session");
			return false;
		}
		let before = if self.is_modified() {
			None
		} else {
			self.checksum.clone()
		};
		self.undo.about_to_reload(before);

		self.state.buffer = TextBuffer::from_text(text);
		if let Some(view) = self.state.view.as_mut() {
			view.clamp(&self.state.buffer);
		}

		let after = checksum_of(text);
		let kept = self.undo.loaded(Some(&after));
		debug!(checksum = %after, kept, "document reloaded");
		self.checksum = Some(after);
		self.set_modified(false);
		kept
	}
}
