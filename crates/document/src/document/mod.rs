//! Document - a line buffer, its active view, and its edit history.
//!
//! Edits go through an edit session (`edit_start`/`edit_end`). Each primitive
//! edit validates its position, reports itself to the [`UndoManager`] while
//! the buffer still shows the pre-edit state, and only then mutates the
//! buffer. The outermost session becomes one undo group.

mod edit;
mod persist;

use scribe_primitives::edit::Result;
use scribe_primitives::{Checksum, Cursor, LineFlags, Range, SecondaryCursors};
use scribe_undo::{ListenerId, UndoConfig, UndoEvent, UndoManager};
use tracing::{trace, warn};

use crate::buffer::{TextBuffer, TextLine};
use crate::state::DocumentState;
use crate::view::{View, clamp_cursor};

/// An open text document with undo history.
#[derive(Debug)]
pub struct Document {
	state: DocumentState,
	undo: UndoManager,
	/// Nesting depth of edit sessions.
	edit_depth: usize,
	/// Whether the current outermost session changed the buffer.
	edit_changed: bool,
	/// Checksum of the content as last saved or loaded.
	checksum: Option<Checksum>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// An empty, unmodified document without a view.
	pub fn new() -> Self {
		Self {
			state: DocumentState::default(),
			undo: UndoManager::new(),
			edit_depth: 0,
			edit_changed: false,
			checksum: None,
		}
	}

	/// A document loaded from `text`. Its lines start untouched.
	pub fn from_text(text: &str) -> Self {
		let mut doc = Self::new();
		doc.state.buffer = TextBuffer::from_text(text);
		doc.checksum = Some(persist::checksum_of(text));
		doc
	}

	/// Applies undo settings, returning the document.
	#[must_use]
	pub fn with_config(mut self, config: &UndoConfig) -> Self {
		self.undo.apply_config(config);
		self
	}

	pub fn text(&self) -> String {
		self.state.buffer.text()
	}

	pub fn line_count(&self) -> usize {
		self.state.buffer.line_count()
	}

	/// Text of `line`, without its line break.
	pub fn line(&self, line: usize) -> Option<&str> {
		self.state.buffer.line(line).map(TextLine::text)
	}

	pub fn line_len(&self, line: usize) -> Option<usize> {
		self.state.buffer.line_len(line)
	}

	pub fn line_flags(&self, line: usize) -> Option<LineFlags> {
		self.state.buffer.line(line).map(TextLine::flags)
	}

	pub fn is_line_modified(&self, line: usize) -> bool {
		self.line_flags(line).is_some_and(LineFlags::is_modified)
	}

	pub fn is_line_saved(&self, line: usize) -> bool {
		self.line_flags(line).is_some_and(LineFlags::is_saved_on_disk)
	}

	pub fn is_line_autowrapped(&self, line: usize) -> bool {
		self.state.buffer.line(line).is_some_and(TextLine::is_autowrapped)
	}

	/// The nearest modified or saved line at or after (`down`) or at or
	/// before `start`.
	pub fn find_touched_line(&self, start: usize, down: bool) -> Option<usize> {
		self.state.buffer.find_touched_line(start, down)
	}

	/// The buffer itself, for read access.
	pub fn buffer(&self) -> &TextBuffer {
		&self.state.buffer
	}

	pub fn is_modified(&self) -> bool {
		self.state.modified
	}

	/// Sets the modified flag. Clearing it records the current history
	/// position as the save point.
	pub fn set_modified(&mut self, modified: bool) {
		if self.state.modified != modified {
			trace!(modified, "document modified flag changed");
		}
		self.state.modified = modified;
		self.undo.set_modified(modified);
	}

	/// Checksum of the content as last saved or loaded.
	pub fn checksum(&self) -> Option<&Checksum> {
		self.checksum.as_ref()
	}

	pub fn undo_manager(&self) -> &UndoManager {
		&self.undo
	}

	pub fn undo_manager_mut(&mut self) -> &mut UndoManager {
		&mut self.undo
	}

	/// Registers `listener` for undo lifecycle events.
	pub fn subscribe(&mut self, listener: impl FnMut(UndoEvent) + 'static) -> ListenerId {
		self.undo.subscribe(listener)
	}

	pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
		self.undo.unsubscribe(id)
	}

	/// Opens the active view with its cursor at the start of the document.
	pub fn create_view(&mut self) {
		self.state.view = Some(View::default());
	}

	pub fn close_view(&mut self) {
		self.state.view = None;
	}

	pub fn view(&self) -> Option<&View> {
		self.state.view.as_ref()
	}

	fn view_mut(&mut self) -> Option<&mut View> {
		self.state.view.as_mut()
	}

	/// Primary cursor of the active view.
	pub fn cursor(&self) -> Option<Cursor> {
		self.view().map(View::cursor)
	}

	/// Moves the primary cursor.
	///
	/// Outside an edit session this is a user move, so the next edit starts
	/// a new undo step. Does nothing without a view.
	pub fn set_cursor_position(&mut self, cursor: Cursor) -> Result<()> {
		self.state.buffer.check_position(cursor.line, cursor.column)?;
		let Some(view) = self.view_mut() else {
			return Ok(());
		};
		view.set_cursor(cursor);
		if self.edit_depth == 0 {
			self.undo.cursor_moved();
		}
		Ok(())
	}

	/// Sets the primary selection. An empty range clears it.
	pub fn set_selection(&mut self, selection: Option<Range>) -> Result<()> {
		if let Some(range) = selection {
			self.check_range(range)?;
		}
		if let Some(view) = self.view_mut() {
			view.set_selection(selection);
		}
		Ok(())
	}

	/// Replaces the secondary cursors. Positions are clamped to the buffer.
	pub fn set_secondary_cursors(&mut self, cursors: SecondaryCursors) {
		let buffer = &self.state.buffer;
		let cursors = cursors
			.into_iter()
			.map(|mut cursor| {
				cursor.pos = clamp_cursor(buffer, cursor.pos);
				cursor.anchor = cursor.anchor.map(|anchor| clamp_cursor(buffer, anchor));
				cursor
			})
			.collect();
		if let Some(view) = self.state.view.as_mut() {
			view.set_secondary_cursors(cursors);
		}
	}

	fn check_range(&self, range: Range) -> Result<()> {
		self.state
			.buffer
			.check_position(range.start.line, range.start.column)?;
		self.state
			.buffer
			.check_position(range.end.line, range.end.column)
	}

	pub fn undo_count(&self) -> usize {
		self.undo.undo_count()
	}

	pub fn redo_count(&self) -> usize {
		self.undo.redo_count()
	}

	/// Reverts the last undo step. Ignored inside an edit session.
	pub fn undo(&mut self) {
		if self.edit_depth > 0 {
			warn!(depth = self.edit_depth, "undo requested inside an edit session");
			return;
		}
		self.undo.undo(&mut self.state);
	}

	/// Re-applies the last undone step. Ignored inside an edit session.
	pub fn redo(&mut self) {
		if self.edit_depth > 0 {
			warn!(depth = self.edit_depth, "redo requested inside an edit session");
			return;
		}
		self.undo.redo(&mut self.state);
	}

	/// Starts an input-method composition: recording pauses and an edit
	/// session stays open until [`input_method_end`](Self::input_method_end).
	pub fn input_method_start(&mut self) {
		self.undo.input_method_start();
		self.edit_start();
	}

	pub fn input_method_end(&mut self) {
		self.edit_end();
		self.undo.input_method_end();
	}
}
