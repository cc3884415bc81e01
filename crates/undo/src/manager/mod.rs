//! The undo manager: stacks, replay, and lifecycle events.
//!
//! Recording lives in [`recording`], save-point tracking in [`modified`] and
//! the reload handshake in [`reload`]; this module owns the state they share
//! and the undo/redo entry points.

mod modified;
mod recording;
mod reload;


use scribe_primitives::Cursor;
use tracing::{debug, trace};

use crate::config::UndoConfig;
use crate::event::{ListenerId, Listeners, UndoEvent};
use crate::group::UndoGroup;
use crate::history::GroupId;
use crate::host::UndoHost;
use crate::merge::{MergePolicy, SameKindMerge};
use crate::save_state::SaveBookkeeping;

use self::reload::ReloadStash;

/// Edit history of one document.
///
/// The text storage brackets every logical edit with
/// [`edit_start`](Self::edit_start)/[`edit_end`](Self::edit_end) and reports
/// each primitive mutation *before* applying it. Undo and redo replay one
/// group at a time through an [`UndoHost`].
///
/// Contract violations (nested brackets, undo while a group is open,
/// toggling recording mid-edit) are caller bugs and panic.
#[derive(Debug)]
pub struct UndoManager {
	undo_stack: Vec<UndoGroup>,
	redo_stack: Vec<UndoGroup>,
	/// Present exactly between `edit_start` and `edit_end` while active.
	open_group: Option<UndoGroup>,
	next_group_id: u64,
	active: bool,
	allow_complex_merge: bool,
	merge_policy: Box<dyn MergePolicy>,
	saved: SaveBookkeeping,
	reload_stash: Option<ReloadStash>,
	listeners: Listeners,
}

impl Default for UndoManager {
	fn default() -> Self {
		Self::new()
	}
}

impl UndoManager {
	/// Creates an empty, active manager with the default merge policy.
	pub fn new() -> Self {
		Self {
			undo_stack: Vec::new(),
			redo_stack: Vec::new(),
			open_group: None,
			next_group_id: 0,
			active: true,
			allow_complex_merge: false,
			merge_policy: Box::new(SameKindMerge),
			saved: SaveBookkeeping::default(),
			reload_stash: None,
			listeners: Listeners::default(),
		}
	}

	/// Creates a manager configured from `config`.
	pub fn with_config(config: &UndoConfig) -> Self {
		let mut manager = Self::new();
		manager.apply_config(config);
		manager
	}

	/// Applies the settings in `config`.
	pub fn apply_config(&mut self, config: &UndoConfig) {
		self.allow_complex_merge = config.allow_complex_merge;
		self.emit(UndoEvent::Changed);
	}

	/// Number of groups that can be undone.
	pub fn undo_count(&self) -> usize {
		self.undo_stack.len()
	}

	/// Number of groups that can be redone.
	pub fn redo_count(&self) -> usize {
		self.redo_stack.len()
	}

	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	/// Returns true unless recording is suspended.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Returns true while an undo group is open.
	pub fn is_editing(&self) -> bool {
		self.open_group.is_some()
	}

	/// The group the next [`undo`](Self::undo) would replay.
	pub fn last_undo_group(&self) -> Option<&UndoGroup> {
		self.undo_stack.last()
	}

	/// The group the next [`redo`](Self::redo) would replay.
	pub fn last_redo_group(&self) -> Option<&UndoGroup> {
		self.redo_stack.last()
	}

	fn undo_top(&self) -> Option<GroupId> {
		self.undo_stack.last().map(UndoGroup::id)
	}

	fn redo_top(&self) -> Option<GroupId> {
		self.redo_stack.last().map(UndoGroup::id)
	}

	/// Lets groups of different kinds merge, as long as neither is a safe
	/// point.
	pub fn set_allow_complex_merge(&mut self, allow: bool) {
		self.allow_complex_merge = allow;
	}

	/// Replaces the policy consulted when complex merging is disabled.
	pub fn set_merge_policy(&mut self, policy: impl MergePolicy + 'static) {
		self.merge_policy = Box::new(policy);
	}

	/// Suspends (`false`) or resumes (`true`) recording.
	///
	/// Setting the current value again does nothing.
	///
	/// # Panics
	///
	/// Panics if an undo group is open.
	pub fn set_active(&mut self, active: bool) {
		assert!(
			self.open_group.is_none(),
			"set_active called inside an edit bracket"
		);
		if self.active == active {
			return;
		}
		self.active = active;
		trace!(active, "undo recording toggled");
		self.emit(UndoEvent::ActiveChanged(active));
	}

	/// Suspends recording for an input-method composition.
	///
	/// The caller opens its own edit bracket after this and closes it before
	/// [`input_method_end`](Self::input_method_end).
	pub fn input_method_start(&mut self) {
		self.set_active(false);
	}

	/// Resumes recording after an input-method composition.
	pub fn input_method_end(&mut self) {
		self.set_active(true);
	}

	/// Overrides where the cursor lands after undoing and redoing the top
	/// undo group.
	///
	/// # Panics
	///
	/// Panics if an undo group is open.
	pub fn set_undo_redo_cursors_of_last_group(&mut self, undo: Cursor, redo: Cursor) {
		assert!(
			self.open_group.is_none(),
			"cursor overrides set inside an edit bracket"
		);
		if let Some(group) = self.undo_stack.last_mut() {
			group.set_cursors(undo, redo);
		}
	}

	/// The redo landing override of the top undo group.
	pub fn last_redo_cursor(&self) -> Option<Cursor> {
		self.undo_stack.last().and_then(UndoGroup::redo_cursor)
	}

	/// Registers `listener` for lifecycle events.
	pub fn subscribe(&mut self, listener: impl FnMut(UndoEvent) + 'static) -> ListenerId {
		self.listeners.subscribe(Box::new(listener))
	}

	/// Removes a listener. Returns false if `id` was not registered.
	pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
		self.listeners.unsubscribe(id)
	}

	fn emit(&mut self, event: UndoEvent) {
		self.listeners.emit(event);
	}

	/// Suspends recording for a replay, returning whether it was active.
	fn begin_replay(&mut self, host: &mut impl UndoHost) -> bool {
		let was_active = self.active;
		if was_active {
			self.set_active(false);
		}
		host.begin_replay();
		was_active
	}

	fn end_replay(&mut self, host: &mut impl UndoHost, was_active: bool) {
		host.end_replay();
		if was_active {
			self.set_active(true);
		}
	}

	/// Reverts the top undo group and moves it to the redo stack.
	///
	/// Does nothing if there is nothing to undo.
	///
	/// # Panics
	///
	/// Panics if an undo group is open.
	pub fn undo(&mut self, host: &mut impl UndoHost) {
		assert!(
			self.open_group.is_none(),
			"undo called inside an edit bracket"
		);
		let Some(group) = self.undo_stack.pop() else {
			return;
		};

		self.emit(UndoEvent::UndoStarted);
		let was_active = self.begin_replay(host);
		group.undo(host);
		self.end_replay(host, was_active);

		debug!(
			group = group.id().get(),
			items = group.len(),
			undo_stack = self.undo_stack.len(),
			redo_stack = self.redo_stack.len() + 1,
			"undo"
		);
		self.redo_stack.push(group);
		self.update_modified(host);

		self.emit(UndoEvent::UndoFinished);
		self.emit(UndoEvent::Changed);
	}

	/// Re-applies the top redo group and moves it to the undo stack.
	///
	/// Does nothing if there is nothing to redo.
	///
	/// # Panics
	///
	/// Panics if an undo group is open.
	pub fn redo(&mut self, host: &mut impl UndoHost) {
		assert!(
			self.open_group.is_none(),
			"redo called inside an edit bracket"
		);
		let Some(group) = self.redo_stack.pop() else {
			return;
		};

		self.emit(UndoEvent::RedoStarted);
		let was_active = self.begin_replay(host);
		group.redo(host);
		self.end_replay(host, was_active);

		debug!(
			group = group.id().get(),
			items = group.len(),
			undo_stack = self.undo_stack.len() + 1,
			redo_stack = self.redo_stack.len(),
			"redo"
		);
		self.undo_stack.push(group);
		self.update_modified(host);

		self.emit(UndoEvent::RedoFinished);
		self.emit(UndoEvent::Changed);
	}
}
