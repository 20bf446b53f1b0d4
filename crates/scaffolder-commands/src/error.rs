//! Error types shared by every scaffolding command

use std::path::{Path, PathBuf};

/// Errors raised while validating input, rendering templates or patching files.
///
/// Every variant is converted into a single status line at the command
/// boundary; nothing is retried.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	/// Missing or empty input, malformed identifier, or a protected target.
	#[error("{0}")]
	Validation(String),

	/// Referenced app, file or settings block does not exist.
	#[error("{0}")]
	NotFound(String),

	/// The artifact to be generated already exists.
	#[error("{0}")]
	Conflict(String),

	/// Underlying read or write failure.
	#[error("I/O error on '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Template rendering failed: {0}")]
	Template(#[from] tera::Error),

	/// `scaffold.toml` could not be parsed.
	#[error("Invalid project configuration: {0}")]
	Config(String),

	/// Interactive input was aborted or unavailable.
	#[error("Input failed: {0}")]
	Prompt(String),

	/// The migration rollback subprocess failed.
	#[error("Migration rollback failed: {0}")]
	Migration(String),
}

impl CommandError {
	/// Wrap an I/O error together with the path it happened on.
	pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}
}

pub type CommandResult<T> = Result<T, CommandError>;
