//! create-view: generate an empty view module inside an app

use super::{Outcome, ScaffoldCommand, create_file, require_absent, require_app, required};
use crate::CommandResult;
use crate::layout::ProjectLayout;
use crate::naming::validate_identifier;
use crate::template::{TemplateContext, TemplateKind, render};

/// Writes `<app>/views/<view>.py`.
#[derive(Debug, Clone)]
pub struct CreateViewCommand {
	pub app_name: String,
	pub view_name: String,
}

impl ScaffoldCommand for CreateViewCommand {
	fn name(&self) -> &str {
		"create-view"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let app_name = required(&self.app_name, "Please provide app name")?;
		require_app(layout, &app_name)?;

		let view_name = required(&self.view_name, "Please provide view name.")?;
		validate_identifier("View name", &view_name)?;

		let view_path = layout
			.app_dir(&app_name)
			.join("views")
			.join(format!("{}.py", view_name));
		require_absent(&view_path, "View already exists".to_string())?;

		let content = render(TemplateKind::View, &TemplateContext::new())?;
		create_file(&view_path, &content)?;

		Ok(Outcome::success(format!(
			"View '{}' created successfully in app '{}'.",
			view_name, app_name
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::CommandError;
	use rstest::{fixture, rstest};
	use tempfile::TempDir;

	#[fixture]
	fn project() -> TempDir {
		let dir = tempfile::tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join("shop/views")).unwrap();
		dir
	}

	fn command(app: &str, view: &str) -> CreateViewCommand {
		CreateViewCommand {
			app_name: app.to_string(),
			view_name: view.to_string(),
		}
	}

	#[rstest]
	fn test_create_view_writes_module(project: TempDir) {
		// Arrange
		let layout = ProjectLayout::new(project.path());

		// Act
		command("shop", "checkout").execute(&layout).unwrap();

		// Assert
		let content =
			std::fs::read_to_string(project.path().join("shop/views/checkout.py")).unwrap();
		assert!(content.starts_with("from django.shortcuts import render\n"));
	}

	#[rstest]
	fn test_create_view_existing_is_conflict(project: TempDir) {
		// Arrange
		let layout = ProjectLayout::new(project.path());
		std::fs::write(project.path().join("shop/views/checkout.py"), "# mine\n").unwrap();

		// Act
		let result = command("shop", "checkout").execute(&layout);

		// Assert
		assert!(matches!(result, Err(CommandError::Conflict(_))));
		assert_eq!(
			std::fs::read_to_string(project.path().join("shop/views/checkout.py")).unwrap(),
			"# mine\n"
		);
	}

	#[rstest]
	#[case("", "checkout")]
	#[case("shop", "")]
	#[case("shop", "check out")]
	#[case("..", "evil")]
	#[case("../shop", "evil")]
	fn test_create_view_validation(project: TempDir, #[case] app: &str, #[case] view: &str) {
		// Arrange
		let layout = ProjectLayout::new(project.path().join("site"));
		std::fs::create_dir_all(project.path().join("site/shop")).unwrap();

		// Act
		let result = command(app, view).execute(&layout);

		// Assert
		assert!(matches!(result, Err(CommandError::Validation(_))));
		assert!(!project.path().join("views").exists());
		assert!(!project.path().join("shop/views/evil.py").exists());
	}

	#[rstest]
	fn test_create_view_unknown_app(project: TempDir) {
		let layout = ProjectLayout::new(project.path());

		let result = command("blog", "index").execute(&layout);

		assert!(matches!(result, Err(CommandError::NotFound(_))));
	}
}
