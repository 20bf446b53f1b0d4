//! create-command: generate a blank management command

use super::{Outcome, ScaffoldCommand, create_file, require_absent, required};
use crate::CommandResult;
use crate::layout::ProjectLayout;
use crate::naming::validate_identifier;
use crate::template::{TemplateContext, TemplateKind, render};

/// Writes `<commands_dir>/<name>.py` from the command skeleton.
#[derive(Debug, Clone)]
pub struct CreateCommandCommand {
	pub command_name: String,
}

impl ScaffoldCommand for CreateCommandCommand {
	fn name(&self) -> &str {
		"create-command"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let command_name = required(&self.command_name, "Please enter command name")?.to_lowercase();
		validate_identifier("Command name", &command_name)?;

		let destination = layout.commands_path().join(format!("{}.py", command_name));
		require_absent(
			&destination,
			format!("Command '{}' already exists.", command_name),
		)?;

		let content = render(TemplateKind::Command, &TemplateContext::new())?;
		create_file(&destination, &content)?;

		Ok(Outcome::success(format!(
			"Command '{}' created successfully at {}.",
			command_name,
			layout.display_path(&destination)
		)))
	}
}
