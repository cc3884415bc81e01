use std::fmt;

/// A position in a document, measured in lines and characters (not bytes).
///
/// Ordering is lexicographic: first by line, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cursor {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based column, in characters.
	pub column: usize,
}

impl Cursor {
	/// Creates a cursor at `line`, `column`.
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// The start of the document.
	pub const fn start() -> Self {
		Self::new(0, 0)
	}
}

impl fmt::Display for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.line, self.column)
	}
}

/// A text range between two cursors.
///
/// `start` is always less than or equal to `end`; [`Range::new`] orders its
/// arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
	/// Inclusive start.
	pub start: Cursor,
	/// Exclusive end.
	pub end: Cursor,
}

impl Range {
	/// Creates a range spanning `a` and `b` in document order.
	pub fn new(a: Cursor, b: Cursor) -> Self {
		if a <= b {
			Self { start: a, end: b }
		} else {
			Self { start: b, end: a }
		}
	}

	/// Creates an empty range at `pos`.
	pub fn point(pos: Cursor) -> Self {
		Self {
			start: pos,
			end: pos,
		}
	}

	/// Returns true if the range covers no text.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if start and end lie on the same line.
	#[inline]
	pub fn on_single_line(&self) -> bool {
		self.start.line == self.end.line
	}

	/// Returns true if `pos` lies within `[start, end)`.
	pub fn contains(&self, pos: Cursor) -> bool {
		self.start <= pos && pos < self.end
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} -> {}]", self.start, self.end)
	}
}
