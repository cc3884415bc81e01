use std::fmt;

/// Opaque digest of a document's saved content.
///
/// The edit-history engine only compares checksums for equality; how they
/// are computed is up to the text storage. An empty checksum never matches
/// anything, including another empty checksum.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Checksum(Box<[u8]>);

impl Checksum {
	/// Wraps raw digest bytes.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into().into_boxed_slice())
	}

	/// The raw digest bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Returns true if the checksum carries no bytes.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if both checksums are non-empty and equal.
	pub fn matches(&self, other: &Checksum) -> bool {
		!self.is_empty() && self == other
	}
}

impl fmt::Display for Checksum {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0.iter() {
			write!(f, "{byte:02x}")?;
		}
		Ok(())
	}
}

impl fmt::Debug for Checksum {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Checksum({self})")
	}
}
