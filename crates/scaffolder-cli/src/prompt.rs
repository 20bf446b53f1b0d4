//! Interactive input for arguments left off the command line

use inquire::Text;
use scaffolder_commands::{CommandError, CommandResult};

/// Source for command inputs that were not passed as arguments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Prompter {
	/// When false, missing inputs stay empty and fail command validation.
	pub(crate) interactive: bool,
}

impl Prompter {
	/// Return `value` if given, otherwise ask for it.
	pub(crate) fn value_or_ask(&self, value: Option<String>, message: &str) -> CommandResult<String> {
		if let Some(value) = value {
			return Ok(value);
		}
		if !self.interactive {
			return Ok(String::new());
		}

		Text::new(message)
			.prompt()
			.map_err(|e| CommandError::Prompt(e.to_string()))
	}
}
