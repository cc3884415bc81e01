//! Primitive, exactly invertible buffer edits.
//!
//! An [`UndoItem`] pairs the edit itself ([`UndoEdit`]) with the line
//! modification state that undoing or redoing it must restore
//! ([`LineModFlags`]). The flags are captured when the item is recorded,
//! because the state a replay has to produce is historical and cannot be
//! recomputed from the buffer afterwards.


use scribe_primitives::LineFlags;

use crate::host::UndoHost;

/// Discriminant of an [`UndoEdit`], used by merge policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndoKind {
	InsertText,
	RemoveText,
	InsertLine,
	RemoveLine,
	WrapLine,
	UnwrapLine,
	MarkLineAutowrapped,
}

/// One primitive buffer mutation, described in its forward direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEdit {
	/// `text` was inserted at `line`, `column`.
	InsertText {
		line: usize,
		column: usize,
		text: String,
	},
	/// `text` was removed from `line`, starting at `column`.
	RemoveText {
		line: usize,
		column: usize,
		text: String,
	},
	/// A line holding `text` was inserted at index `line`.
	InsertLine { line: usize, text: String },
	/// The line at index `line`, holding `text`, was removed.
	RemoveLine { line: usize, text: String },
	/// `line` was split at `column`, moving `len` characters to the next
	/// line. `new_line` records whether a line was created for them or they
	/// were prepended to the existing next line.
	WrapLine {
		line: usize,
		column: usize,
		len: usize,
		new_line: bool,
	},
	/// The line after `line` was joined onto it at `column` (the former
	/// length of `line`). `line_removed` records whether the next line was
	/// removed or only its first `len` characters were moved up.
	UnwrapLine {
		line: usize,
		column: usize,
		len: usize,
		line_removed: bool,
	},
	/// The autowrap hint of `line` changed from `previous` to `autowrapped`.
	MarkLineAutowrapped {
		line: usize,
		autowrapped: bool,
		previous: bool,
	},
}

impl UndoEdit {
	/// The kind of this edit.
	pub fn kind(&self) -> UndoKind {
		match self {
			Self::InsertText { .. } => UndoKind::InsertText,
			Self::RemoveText { .. } => UndoKind::RemoveText,
			Self::InsertLine { .. } => UndoKind::InsertLine,
			Self::RemoveLine { .. } => UndoKind::RemoveLine,
			Self::WrapLine { .. } => UndoKind::WrapLine,
			Self::UnwrapLine { .. } => UndoKind::UnwrapLine,
			Self::MarkLineAutowrapped { .. } => UndoKind::MarkLineAutowrapped,
		}
	}

	/// The first line the edit touches.
	pub fn line(&self) -> usize {
		match self {
			Self::InsertText { line, .. }
			| Self::RemoveText { line, .. }
			| Self::InsertLine { line, .. }
			| Self::RemoveLine { line, .. }
			| Self::WrapLine { line, .. }
			| Self::UnwrapLine { line, .. }
			| Self::MarkLineAutowrapped { line, .. } => *line,
		}
	}
}

/// Which line, in which replay direction, a pair of flags describes.
///
/// Line 1 is the edit's own line, line 2 the line after it (only used by
/// wraps and unwraps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSlot {
	Undo1,
	Undo2,
	Redo1,
	Redo2,
}

impl LineSlot {
	const ALL: [Self; 4] = [Self::Undo1, Self::Undo2, Self::Redo1, Self::Redo2];
}

bitflags::bitflags! {
	/// Line states an item restores, per replay direction and line.
	///
	/// Each [`LineSlot`] owns a `MODIFIED`/`SAVED` pair. A slot with neither
	/// bit set leaves the line untouched-looking (no flags) after replay.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct LineModFlags: u8 {
		const UNDO_LINE1_MODIFIED = 1 << 0;
		const UNDO_LINE1_SAVED = 1 << 1;
		const UNDO_LINE2_MODIFIED = 1 << 2;
		const UNDO_LINE2_SAVED = 1 << 3;
		const REDO_LINE1_MODIFIED = 1 << 4;
		const REDO_LINE1_SAVED = 1 << 5;
		const REDO_LINE2_MODIFIED = 1 << 6;
		const REDO_LINE2_SAVED = 1 << 7;
	}
}

impl LineModFlags {
	fn slot_bits(slot: LineSlot) -> (Self, Self) {
		match slot {
			LineSlot::Undo1 => (Self::UNDO_LINE1_MODIFIED, Self::UNDO_LINE1_SAVED),
			LineSlot::Undo2 => (Self::UNDO_LINE2_MODIFIED, Self::UNDO_LINE2_SAVED),
			LineSlot::Redo1 => (Self::REDO_LINE1_MODIFIED, Self::REDO_LINE1_SAVED),
			LineSlot::Redo2 => (Self::REDO_LINE2_MODIFIED, Self::REDO_LINE2_SAVED),
		}
	}

	/// The line state stored in `slot`.
	pub fn get(self, slot: LineSlot) -> LineFlags {
		let (modified, saved) = Self::slot_bits(slot);
		LineFlags::from_marks(self.contains(modified), self.contains(saved))
	}

	/// Stores `state` in `slot`, replacing whatever was there.
	pub fn set_slot(&mut self, slot: LineSlot, state: LineFlags) {
		let (modified, saved) = Self::slot_bits(slot);
		self.remove(modified | saved);
		if state.is_saved_on_disk() {
			self.insert(saved);
		} else if state.is_modified() {
			self.insert(modified);
		}
	}

	/// Builder form of [`set_slot`](Self::set_slot).
	#[must_use]
	pub fn with(mut self, slot: LineSlot, state: LineFlags) -> Self {
		self.set_slot(slot, state);
		self
	}

	/// Turns every `saved` slot into `modified`.
	///
	/// After a new save, "identical to the previous save" no longer means
	/// "identical to disk".
	pub fn flag_saved_as_modified(&mut self) {
		for slot in LineSlot::ALL {
			if self.get(slot).is_saved_on_disk() {
				self.set_slot(slot, LineFlags::modified());
			}
		}
	}

	/// Turns `slot` into `saved`, unconditionally.
	fn mark_saved(&mut self, slot: LineSlot) {
		self.set_slot(slot, LineFlags::saved());
	}

	/// Turns `slot` into `saved` if it currently says `modified`.
	fn promote_modified(&mut self, slot: LineSlot) {
		if self.get(slot).is_modified() {
			self.mark_saved(slot);
		}
	}
}

/// Line indices already claimed by an item nearer to the present while
/// sweeping the history for saved lines.
#[derive(Debug, Default)]
pub(crate) struct TouchedLines(Vec<bool>);

impl TouchedLines {
	pub(crate) fn with_len(len: usize) -> Self {
		Self(vec![false; len])
	}

	/// Claims `line`, returning whether it was already claimed.
	pub(crate) fn claim(&mut self, line: usize) -> bool {
		if line >= self.0.len() {
			self.0.resize(line + 1, false);
		}
		std::mem::replace(&mut self.0[line], true)
	}

	pub(crate) fn is_claimed(&self, line: usize) -> bool {
		self.0.get(line).copied().unwrap_or(false)
	}
}

/// A recorded edit together with the line states its replay restores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoItem {
	edit: UndoEdit,
	line_mod: LineModFlags,
}

impl UndoItem {
	/// Creates an item from an edit and its captured line states.
	pub fn new(edit: UndoEdit, line_mod: LineModFlags) -> Self {
		Self { edit, line_mod }
	}

	/// The recorded edit.
	pub fn edit(&self) -> &UndoEdit {
		&self.edit
	}

	/// The captured line states.
	pub fn line_mod(&self) -> LineModFlags {
		self.line_mod
	}

	/// The kind of the recorded edit.
	pub fn kind(&self) -> UndoKind {
		self.edit.kind()
	}

	/// Returns true if replaying the item would do nothing.
	pub fn is_empty(&self) -> bool {
		match &self.edit {
			UndoEdit::InsertText { text, .. } | UndoEdit::RemoveText { text, .. } => {
				text.is_empty()
			}
			_ => false,
		}
	}

	/// Absorbs `next` into `self` when both describe one contiguous text run.
	///
	/// Handles typing (insertion right after the previous insertion),
	/// backspacing (removal right before the previous removal) and forward
	/// deletion (removal at the same column). Returns false and leaves `self`
	/// unchanged otherwise. The captured undo state of `self` stays valid for
	/// the combined edit, as it describes the line before the first edit.
	pub fn merge_with(&mut self, next: &UndoItem) -> bool {
		match (&mut self.edit, &next.edit) {
			(
				UndoEdit::InsertText { line, column, text },
				UndoEdit::InsertText {
					line: next_line,
					column: next_column,
					text: next_text,
				},
			) if *line == *next_line && *column + text.chars().count() == *next_column => {
				text.push_str(next_text);
				true
			}
			(
				UndoEdit::RemoveText { line, column, text },
				UndoEdit::RemoveText {
					line: next_line,
					column: next_column,
					text: next_text,
				},
			) if *line == *next_line => {
				if *next_column + next_text.chars().count() == *column {
					text.insert_str(0, next_text);
					*column = *next_column;
					true
				} else if *next_column == *column {
					text.push_str(next_text);
					true
				} else {
					false
				}
			}
			_ => false,
		}
	}

	fn restore_line(&self, host: &mut impl UndoHost, line: usize, slot: LineSlot) {
		host.set_line_flags(line, self.line_mod.get(slot));
	}

	/// Applies the inverse of the edit and restores the pre-edit line states.
	pub fn undo(&self, host: &mut impl UndoHost) {
		match &self.edit {
			UndoEdit::InsertText { line, column, text } => {
				host.remove_text(*line, *column, text.chars().count());
				self.restore_line(host, *line, LineSlot::Undo1);
			}
			UndoEdit::RemoveText { line, column, text } => {
				host.insert_text(*line, *column, text);
				self.restore_line(host, *line, LineSlot::Undo1);
			}
			UndoEdit::InsertLine { line, .. } => {
				host.remove_line(*line);
			}
			UndoEdit::RemoveLine { line, text } => {
				host.insert_line(*line, text);
				self.restore_line(host, *line, LineSlot::Undo1);
			}
			UndoEdit::WrapLine {
				line,
				len,
				new_line,
				..
			} => {
				host.unwrap_line(*line, *new_line, *len);
				self.restore_line(host, *line, LineSlot::Undo1);
			}
			UndoEdit::UnwrapLine {
				line,
				column,
				line_removed,
				..
			} => {
				host.wrap_line(*line, *column, *line_removed);
				self.restore_line(host, *line + 1, LineSlot::Undo2);
				self.restore_line(host, *line, LineSlot::Undo1);
			}
			UndoEdit::MarkLineAutowrapped { line, previous, .. } => {
				host.mark_line_autowrapped(*line, *previous);
			}
		}
	}

	/// Re-applies the edit and restores the post-edit line states.
	pub fn redo(&self, host: &mut impl UndoHost) {
		match &self.edit {
			UndoEdit::InsertText { line, column, text } => {
				host.insert_text(*line, *column, text);
				self.restore_line(host, *line, LineSlot::Redo1);
			}
			UndoEdit::RemoveText { line, column, text } => {
				host.remove_text(*line, *column, text.chars().count());
				self.restore_line(host, *line, LineSlot::Redo1);
			}
			UndoEdit::InsertLine { line, text } => {
				host.insert_line(*line, text);
				self.restore_line(host, *line, LineSlot::Redo1);
			}
			UndoEdit::RemoveLine { line, .. } => {
				host.remove_line(*line);
			}
			UndoEdit::WrapLine {
				line,
				column,
				new_line,
				..
			} => {
				host.wrap_line(*line, *column, *new_line);
				self.restore_line(host, *line + 1, LineSlot::Redo2);
				self.restore_line(host, *line, LineSlot::Redo1);
			}
			UndoEdit::UnwrapLine {
				line,
				len,
				line_removed,
				..
			} => {
				host.unwrap_line(*line, *line_removed, *len);
				self.restore_line(host, *line, LineSlot::Redo1);
			}
			UndoEdit::MarkLineAutowrapped {
				line, autowrapped, ..
			} => {
				host.mark_line_autowrapped(*line, *autowrapped);
			}
		}
	}

	pub(crate) fn flag_saved_as_modified(&mut self) {
		self.line_mod.flag_saved_as_modified();
	}

	/// Marks the undo-direction states of lines not yet claimed as saved.
	///
	/// Used on redo-stack items: undoing one of them is the next thing that
	/// would touch those lines, so if the line was just saved, undo must
	/// restore it as saved.
	pub(crate) fn mark_undo_as_saved(&mut self, lines: &mut TouchedLines) {
		let line = self.edit.line();
		// Every item claims its line, including kinds that never re-flag it.
		// Older items on the same line stay as they are.
		let claimed = lines.claim(line);
		let flags = &mut self.line_mod;
		match self.edit.kind() {
			UndoKind::InsertText | UndoKind::RemoveText | UndoKind::RemoveLine => {
				if !claimed {
					flags.mark_saved(LineSlot::Undo1);
				}
			}
			UndoKind::WrapLine => {
				if !claimed {
					flags.promote_modified(LineSlot::Undo1);
				}
			}
			UndoKind::UnwrapLine => {
				if !claimed {
					flags.promote_modified(LineSlot::Undo1);
				}
				if flags.get(LineSlot::Undo2).is_modified() && !lines.is_claimed(line + 1) {
					lines.claim(line + 1);
					flags.mark_saved(LineSlot::Undo2);
				}
			}
			UndoKind::InsertLine | UndoKind::MarkLineAutowrapped => {}
		}
	}

	/// Marks the redo-direction states of lines not yet claimed as saved.
	///
	/// Used on undo-stack items: the state after redoing one of them is the
	/// state the buffer was in when the save happened.
	pub(crate) fn mark_redo_as_saved(&mut self, lines: &mut TouchedLines) {
		let line = self.edit.line();
		// Claimed regardless of kind, as in the undo-direction sweep.
		let claimed = lines.claim(line);
		let flags = &mut self.line_mod;
		match self.edit.kind() {
			UndoKind::InsertText | UndoKind::RemoveText | UndoKind::InsertLine => {
				if !claimed {
					flags.mark_saved(LineSlot::Redo1);
				}
			}
			UndoKind::WrapLine => {
				if !claimed {
					flags.promote_modified(LineSlot::Redo1);
				}
				if flags.get(LineSlot::Redo2).is_modified() && !lines.is_claimed(line + 1) {
					lines.claim(line + 1);
					flags.mark_saved(LineSlot::Redo2);
				}
			}
			UndoKind::UnwrapLine => {
				if !claimed {
					flags.promote_modified(LineSlot::Redo1);
				}
			}
			UndoKind::RemoveLine | UndoKind::MarkLineAutowrapped => {}
		}
	}
}
