//! remove-app: roll back, unregister and delete an app

use std::fs;
use std::process::Command;

use super::{Outcome, ScaffoldCommand};
use crate::layout::ProjectLayout;
use crate::naming::validate_identifier;
use crate::patch::patch_file;
use crate::{CommandError, CommandResult};

/// File that marks a directory as an app package.
const APP_CONFIG_FILE: &str = "apps.py";

/// How references to the app are stripped from settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceRemoval {
	/// Only quoted entries inside the installed-apps list.
	#[default]
	Scoped,
	/// Every line that mentions the app name, anywhere in the file.
	AllLines,
}

#[derive(Debug, Clone)]
pub struct RemoveAppCommand {
	pub app_name: String,
	/// Skip `migrate <app> zero` before deleting.
	pub skip_migrations: bool,
	pub references: ReferenceRemoval,
}

impl RemoveAppCommand {
	pub fn new(app_name: impl Into<String>) -> Self {
		Self {
			app_name: app_name.into(),
			skip_migrations: false,
			references: ReferenceRemoval::default(),
		}
	}

	fn roll_back_migrations(&self, layout: &ProjectLayout, app_name: &str) -> CommandResult<()> {
		let Some((program, args)) = layout.migrate_command.split_first() else {
			return Err(CommandError::Config(
				"migrate_command must name a program".to_string(),
			));
		};

		tracing::info!(app = app_name, "rolling back migrations");
		let status = Command::new(program)
			.args(args)
			.arg(app_name)
			.arg("zero")
			.current_dir(&layout.root)
			.status()
			.map_err(|e| CommandError::Migration(format!("failed to run '{}': {}", program, e)))?;

		if !status.success() {
			return Err(CommandError::Migration(format!(
				"Rolling back migrations for '{}' failed ({}).",
				app_name, status
			)));
		}
		Ok(())
	}

	fn unregister(&self, layout: &ProjectLayout, app_name: &str) -> CommandResult<()> {
		for path in layout.settings_files() {
			if !path.is_file() {
				tracing::debug!(path = %path.display(), "settings file missing, skipped");
				continue;
			}

			let removed = patch_file(&path, |buffer| match self.references {
				ReferenceRemoval::Scoped => {
					buffer.remove_list_entry(&layout.installed_apps_marker, app_name, ']')
				}
				ReferenceRemoval::AllLines => Ok(buffer.remove_lines_containing(app_name)),
			})?;

			match removed {
				Ok(0) => tracing::debug!(path = %path.display(), "app not listed"),
				Ok(count) => tracing::debug!(path = %path.display(), lines = count, "removed app"),
				Err(lookup) => tracing::warn!(
					path = %layout.display_path(&path),
					"{} list not located ({:?})",
					layout.installed_apps_marker,
					lookup
				),
			}
		}
		Ok(())
	}
}

impl ScaffoldCommand for RemoveAppCommand {
	fn name(&self) -> &str {
		"remove-app"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let app_name = self.app_name.trim().to_lowercase();
		if app_name.is_empty() {
			return Err(CommandError::Validation("App name is required".to_string()));
		}
		validate_identifier("App name", &app_name)?;
		if layout.is_protected(&app_name) {
			return Err(CommandError::Validation(format!(
				"You cannot remove the {} app.",
				app_name
			)));
		}

		let app_dir = layout.app_dir(&app_name);
		let dir_exists = app_dir.is_dir();
		let is_app_package = app_dir.join(APP_CONFIG_FILE).is_file();
		if !is_app_package && !layout.is_registered(&app_name) {
			return Err(CommandError::NotFound(format!(
				"App '{}' not found.",
				app_name
			)));
		}

		if !self.skip_migrations {
			self.roll_back_migrations(layout, &app_name)?;
		}

		self.unregister(layout, &app_name)?;

		if !dir_exists {
			return Ok(Outcome::warning(format!(
				"App directory '{}' does not exist.",
				layout.display_path(&app_dir)
			)));
		}

		fs::remove_dir_all(&app_dir).map_err(|e| CommandError::io(&app_dir, e))?;
		tracing::debug!(path = %app_dir.display(), "removed app directory");

		Ok(Outcome::success(format!(
			"App '{}' and its contents successfully removed.",
			app_name
		)))
	}
}
