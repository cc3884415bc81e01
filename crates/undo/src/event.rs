//! Lifecycle notifications emitted by the undo manager.

use std::fmt;

/// Something observable happened to the edit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoEvent {
	/// Undo/redo availability or stack contents changed.
	Changed,
	/// An undo step is about to be replayed.
	UndoStarted,
	/// An undo step finished replaying.
	UndoFinished,
	/// A redo step is about to be replayed.
	RedoStarted,
	/// A redo step finished replaying.
	RedoFinished,
	/// Recording was suspended (`false`) or resumed (`true`).
	ActiveChanged(bool),
}

/// Handle returned by [`UndoManager::subscribe`](crate::UndoManager::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(UndoEvent)>;

/// Registered event listeners, called in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
	next_id: u64,
	entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
	pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, listener));
		id
	}

	pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
		let before = self.entries.len();
		self.entries.retain(|(entry, _)| *entry != id);
		self.entries.len() != before
	}

	pub(crate) fn emit(&mut self, event: UndoEvent) {
		for (_, listener) in &mut self.entries {
			listener(event);
		}
	}
}

impl fmt::Debug for Listeners {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listeners")
			.field("count", &self.entries.len())
			.finish()
	}
}
