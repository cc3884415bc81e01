use thiserror::Error;

/// Errors returned when a primitive edit addresses text that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// The line index is past the end of the buffer.
	#[error("line {line} out of range (buffer has {lines} lines)")]
	LineOutOfRange {
		/// Requested line.
		line: usize,
		/// Number of lines in the buffer.
		lines: usize,
	},

	/// The column is past the end of the line.
	#[error("column {column} out of range for line {line} (length {len})")]
	ColumnOutOfRange {
		/// Line of the requested position.
		line: usize,
		/// Requested column.
		column: usize,
		/// Length of the line in characters.
		len: usize,
	},

	/// The edit needs a line after `line`, but `line` is the last one.
	#[error("line {line} has no following line")]
	NoNextLine {
		/// Line that was to be joined with its successor.
		line: usize,
	},

	/// Single-line text passed to a primitive edit contained a line break.
	#[error("text for line {line} contains a line break")]
	LineBreak {
		/// Line the text was meant for.
		line: usize,
	},
}

/// Result type for primitive edits.
pub type Result<T> = std::result::Result<T, EditError>;
