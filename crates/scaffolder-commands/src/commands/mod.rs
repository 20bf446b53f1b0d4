//! Scaffolding commands
//!
//! Each command follows the same sequence: validate inputs, check
//! preconditions, render and/or patch, then report one [`Outcome`]. All
//! validation happens before the first filesystem mutation.

mod add_model;
mod create_app;
mod create_command;
mod create_view;
mod remove_app;
mod set_secret_key;
mod setup_crud_view;

pub use add_model::AddModelCommand;
pub use create_app::CreateAppCommand;
pub use create_command::CreateCommandCommand;
pub use create_view::CreateViewCommand;
pub use remove_app::{ReferenceRemoval, RemoveAppCommand};
pub use set_secret_key::{SetSecretKeyCommand, generate_secret_key};
pub use setup_crud_view::SetupCrudViewCommand;

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::layout::ProjectLayout;
use crate::naming::validate_identifier;
use crate::{CommandError, CommandResult};

/// Severity of a completed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	Success,
	/// Completed, but something needs the user's attention.
	Warning,
}

/// The single status reported by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	pub status: Status,
	pub message: String,
}

impl Outcome {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			status: Status::Success,
			message: message.into(),
		}
	}

	pub fn warning(message: impl Into<String>) -> Self {
		Self {
			status: Status::Warning,
			message: message.into(),
		}
	}
}

/// A scaffolding command with its inputs already collected.
pub trait ScaffoldCommand {
	/// Command name as used on the command line.
	fn name(&self) -> &str;

	/// Run the command against the project described by `layout`.
	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome>;
}

/// Trim `value` and fail with `message` if nothing is left.
pub(crate) fn required(value: &str, message: &str) -> CommandResult<String> {
	let value = value.trim();
	if value.is_empty() {
		return Err(CommandError::Validation(message.to_string()));
	}
	Ok(value.to_string())
}

/// Fail unless `app_name` is an identifier naming an existing app directory.
///
/// The identifier check keeps `..`, nested and absolute paths from resolving
/// outside the project root.
pub(crate) fn require_app(layout: &ProjectLayout, app_name: &str) -> CommandResult<()> {
	validate_identifier("App name", app_name)?;
	if !layout.app_dir(app_name).is_dir() {
		return Err(CommandError::NotFound(format!(
			"App '{}' not found.",
			app_name
		)));
	}
	Ok(())
}

/// Fail with [`CommandError::Conflict`] if `path` already exists.
pub(crate) fn require_absent(path: &Path, message: String) -> CommandResult<()> {
	if path.exists() {
		return Err(CommandError::Conflict(message));
	}
	Ok(())
}

/// Create a new file with `content`, creating parent directories as needed.
///
/// Never overwrites: an existing file is reported as a conflict.
pub(crate) fn create_file(path: &Path, content: &str) -> CommandResult<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).map_err(|e| CommandError::io(parent, e))?;
	}

	let mut file = fs::OpenOptions::new()
		.write(true)
		.create_new(true)
		.open(path)
		.map_err(|e| match e.kind() {
			std::io::ErrorKind::AlreadyExists => {
				CommandError::Conflict(format!("'{}' already exists.", path.display()))
			}
			_ => CommandError::io(path, e),
		})?;
	file.write_all(content.as_bytes())
		.map_err(|e| CommandError::io(path, e))?;

	tracing::debug!(path = %path.display(), "created file");
	Ok(())
}
