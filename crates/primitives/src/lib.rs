//! Core types shared by the edit-history engine: positions, per-line
//! modification flags, checksums and edit errors.

/// Opaque content checksums.
pub mod checksum;
/// Errors raised by primitive buffer edits.
pub mod edit;
/// Per-line `modified` / `saved on disk` flags and the rules edits apply to them.
pub mod line_flags;
/// Line/column positions and ranges.
pub mod range;
/// Secondary (multi-cursor) positions.
pub mod selection;

pub use checksum::Checksum;
pub use edit::EditError;
pub use line_flags::LineFlags;
pub use range::{Cursor, Range};
pub use selection::{SecondaryCursor, SecondaryCursors};
