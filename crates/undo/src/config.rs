//! Undo behaviour settings.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading undo settings.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an invalid value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings of an [`UndoManager`](crate::UndoManager).
///
/// ```toml
/// allow_complex_merge = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UndoConfig {
	/// Merge adjacent groups regardless of their kinds. Safe points still
	/// separate steps.
	pub allow_complex_merge: bool,
}

impl UndoConfig {
	/// Parses settings from TOML. Missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a TOML settings file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}
}
