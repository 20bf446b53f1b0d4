//! create-app: lay down an app skeleton and register it in settings

use super::{Outcome, ScaffoldCommand, create_file, require_absent, required};
use crate::layout::ProjectLayout;
use crate::naming::{to_pascal_case, validate_identifier};
use crate::patch::{ListInsert, patch_file};
use crate::template::{TemplateContext, TemplateKind, render};
use crate::{CommandError, CommandResult};

/// Package markers created empty inside a new app.
const PACKAGE_FILES: &[&str] = &[
	"__init__.py",
	"views/__init__.py",
	"serializers/__init__.py",
	"services/__init__.py",
	"migrations/__init__.py",
];

#[derive(Debug, Clone)]
pub struct CreateAppCommand {
	pub app_name: String,
}

impl CreateAppCommand {
	fn write_skeleton(&self, layout: &ProjectLayout, app_name: &str) -> CommandResult<()> {
		let app_dir = layout.app_dir(app_name);
		let config_ctx = TemplateContext::new()
			.with("app_name", app_name)?
			.with("app_config_class", format!("{}Config", to_pascal_case(app_name)))?;
		let empty = TemplateContext::new();

		let rendered = [
			("admin.py", render(TemplateKind::AppAdmin, &empty)?),
			("apps.py", render(TemplateKind::AppConfig, &config_ctx)?),
			("models.py", render(TemplateKind::AppModels, &empty)?),
			("tests.py", render(TemplateKind::AppTests, &empty)?),
		];

		for file in PACKAGE_FILES {
			create_file(&app_dir.join(file), "")?;
		}
		for (file, content) in &rendered {
			create_file(&app_dir.join(file), content)?;
		}
		Ok(())
	}

	/// Add the app to every settings file; returns one note per file needing attention.
	fn register(&self, layout: &ProjectLayout, app_name: &str) -> CommandResult<Vec<String>> {
		let entry = format!("    '{}',\n", app_name);
		let marker = &layout.installed_apps_marker;
		let mut notes = Vec::new();

		for path in layout.settings_files() {
			let shown = layout.display_path(&path).to_string();
			if !path.is_file() {
				notes.push(format!("Settings file '{}' not found.", shown));
				continue;
			}

			match patch_file(&path, |buffer| buffer.insert_list_entry(marker, &entry, ']'))? {
				ListInsert::Inserted(line) => {
					tracing::info!(path = %shown, line = line + 1, "added '{}' to {}", app_name, marker)
				}
				ListInsert::AlreadyPresent => notes.push(format!(
					"'{}' is already present in {} in '{}'.",
					app_name, marker, shown
				)),
				_ => notes.push(format!(
					"Could not locate {} in '{}'. Add the app manually.",
					marker, shown
				)),
			}
		}

		for note in &notes {
			tracing::warn!("{}", note);
		}
		Ok(notes)
	}
}

impl ScaffoldCommand for CreateAppCommand {
	fn name(&self) -> &str {
		"create-app"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let app_name = required(&self.app_name, "App name is required")?;
		validate_identifier("App name", &app_name)?;
		if layout.is_protected(&app_name) {
			return Err(CommandError::Validation(format!(
				"'{}' is reserved and cannot be created.",
				app_name
			)));
		}
		require_absent(
			&layout.app_dir(&app_name),
			format!("App '{}' already exists.", app_name),
		)?;

		self.write_skeleton(layout, &app_name)?;
		let notes = self.register(layout, &app_name)?;

		if notes.is_empty() {
			Ok(Outcome::success(format!(
				"App '{}' setup completed.",
				app_name
			)))
		} else {
			Ok(Outcome::warning(format!(
				"App '{}' created; {} settings file(s) need attention: {}",
				app_name,
				notes.len(),
				notes.join(" ")
			)))
		}
	}
}
