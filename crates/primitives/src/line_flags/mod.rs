//! Per-line modification state.
//!
//! Every line carries two flags: [`LineFlags::MODIFIED`] (content differs from
//! the last save) and [`LineFlags::SAVED_ON_DISK`] (content is exactly what was
//! last written). The setters keep the two mutually exclusive, so a line is
//! always in one of three states: untouched, modified, or saved.
//!
//! The free functions in this module describe how wrapping and unwrapping
//! lines moves those states around. The buffer applies them when it performs
//! an edit and the undo recorder applies them to compute the state a redo
//! must restore, so both sides always agree.


bitflags::bitflags! {
	/// Modification flags of a single line.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct LineFlags: u8 {
		/// Content differs from the last save point.
		const MODIFIED = 1 << 0;
		/// Content is exactly what was last written to disk.
		const SAVED_ON_DISK = 1 << 1;
	}
}

impl LineFlags {
	/// A line changed since the last save.
	pub const fn modified() -> Self {
		Self::MODIFIED
	}

	/// A line that matches the last save.
	pub const fn saved() -> Self {
		Self::SAVED_ON_DISK
	}

	/// Builds the state described by a pair of booleans.
	///
	/// Applies [`mark_as_modified`](Self::mark_as_modified) then
	/// [`mark_as_saved_on_disk`](Self::mark_as_saved_on_disk), so `saved`
	/// wins if both are set.
	pub fn from_marks(modified: bool, saved_on_disk: bool) -> Self {
		let mut flags = Self::empty();
		flags.mark_as_modified(modified);
		flags.mark_as_saved_on_disk(saved_on_disk);
		flags
	}

	/// Returns true if the line is marked modified.
	#[inline]
	pub fn is_modified(self) -> bool {
		self.contains(Self::MODIFIED)
	}

	/// Returns true if the line is marked saved on disk.
	#[inline]
	pub fn is_saved_on_disk(self) -> bool {
		self.contains(Self::SAVED_ON_DISK)
	}

	/// Returns true if the line is either modified or saved.
	#[inline]
	pub fn is_touched(self) -> bool {
		!self.is_empty()
	}

	/// Sets or clears the modified flag. Setting it clears saved-on-disk.
	pub fn mark_as_modified(&mut self, modified: bool) {
		if modified {
			self.insert(Self::MODIFIED);
			self.remove(Self::SAVED_ON_DISK);
		} else {
			self.remove(Self::MODIFIED);
		}
	}

	/// Sets or clears the saved-on-disk flag. Setting it clears modified.
	pub fn mark_as_saved_on_disk(&mut self, saved_on_disk: bool) {
		if saved_on_disk {
			self.insert(Self::SAVED_ON_DISK);
			self.remove(Self::MODIFIED);
		} else {
			self.remove(Self::SAVED_ON_DISK);
		}
	}

	/// The state the line has after the save that follows: modified lines
	/// become saved, everything else is unchanged.
	pub fn after_save(self) -> Self {
		if self.is_modified() {
			Self::saved()
		} else {
			self
		}
	}
}

/// States of the two lines produced by splitting a line.
///
/// `state` is the state of the line before the split, `column` the split
/// column and `tail_len` the number of characters moved to the second line.
/// The head changes only if text was moved away from it; the tail is new
/// content unless the whole line moved down (split at column zero).
pub fn wrapped(state: LineFlags, column: usize, tail_len: usize) -> (LineFlags, LineFlags) {
	let head = if tail_len > 0 {
		LineFlags::modified()
	} else {
		state
	};
	let tail = if column > 0 || tail_len == 0 {
		LineFlags::modified()
	} else {
		state
	};
	(head, tail)
}

/// State of the line produced by appending a line of `second_len`
/// characters in state `second` to a line of `first_len` characters.
///
/// Joining two non-empty lines creates new content. If either side is empty,
/// the joined line carries the state of the second line.
pub fn unwrapped(first_len: usize, second: LineFlags, second_len: usize) -> LineFlags {
	if first_len > 0 && second_len > 0 {
		LineFlags::modified()
	} else {
		second
	}
}
