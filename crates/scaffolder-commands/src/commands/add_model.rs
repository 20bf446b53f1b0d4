//! add-model: append a model class to an app's `models.py`

use super::{Outcome, ScaffoldCommand, require_app, required};
use crate::layout::ProjectLayout;
use crate::naming::{validate_identifier, validate_string_literal};
use crate::patch::patch_file;
use crate::template::{TemplateContext, TemplateKind, render};
use crate::{CommandError, CommandResult};

/// Import the generated `save()` override relies on.
pub const TIMEZONE_IMPORT: &str = "from django.utils.timezone import now";

/// Adds a timestamped model to the given app.
#[derive(Debug, Clone)]
pub struct AddModelCommand {
	pub model_name: String,
	pub app_name: String,
	pub table_name: String,
}

impl ScaffoldCommand for AddModelCommand {
	fn name(&self) -> &str {
		"add-model"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		const MISSING: &str = "'model_name', 'app_name', and 'table_name' are required.";
		let model_name = required(&self.model_name, MISSING)?;
		let app_name = required(&self.app_name, MISSING)?;
		let table_name = required(&self.table_name, MISSING)?;
		validate_identifier("Model name", &model_name)?;
		validate_string_literal("Table name", &table_name)?;

		require_app(layout, &app_name)?;

		let models_path = layout.app_dir(&app_name).join("models.py");
		if !models_path.is_file() {
			return Err(CommandError::NotFound(format!(
				"models.py file not found in app '{}'.",
				app_name
			)));
		}

		let ctx = TemplateContext::new()
			.with("model_name", &model_name)?
			.with("table_name", &table_name)?;
		let model_source = render(TemplateKind::Model, &ctx)?;

		let added_import = patch_file(&models_path, |buffer| {
			let added = buffer.prepend_if_absent(TIMEZONE_IMPORT);
			buffer.append(&model_source);
			added
		})?;
		if added_import {
			tracing::debug!(path = %models_path.display(), "added timezone import");
		}

		Ok(Outcome::success(format!(
			"Model '{}' added successfully to {}.",
			model_name,
			layout.display_path(&models_path)
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use tempfile::TempDir;

	#[fixture]
	fn project() -> TempDir {
		let dir = tempfile::tempdir().unwrap();
		std::fs::create_dir(dir.path().join("shop")).unwrap();
		std::fs::write(
			dir.path().join("shop/models.py"),
			"from django.db import models\n\n# Create your models here.\n",
		)
		.unwrap();
		dir
	}

	fn command(model: &str, app: &str, table: &str) -> AddModelCommand {
		AddModelCommand {
			model_name: model.to_string(),
			app_name: app.to_string(),
			table_name: table.to_string(),
		}
	}

	#[rstest]
	fn test_add_model_prepends_import_and_appends_class(project: TempDir) {
		// Arrange
		let layout = ProjectLayout::new(project.path());

		// Act
		let outcome = command("Order", "shop", "orders").execute(&layout).unwrap();

		// Assert
		assert_eq!(outcome.status, crate::commands::Status::Success);
		let content = std::fs::read_to_string(project.path().join("shop/models.py")).unwrap();
		assert!(content.starts_with("from django.utils.timezone import now\nfrom django.db import models\n"));
		assert_eq!(content.matches(TIMEZONE_IMPORT).count(), 1);
		assert!(content.contains("class Order(models.Model):"));
		assert!(content.contains("db_table = \"orders\""));
	}

	#[rstest]
	fn test_add_model_twice_keeps_single_import(project: TempDir) {
		// Arrange
		let layout = ProjectLayout::new(project.path());

		// Act
		command("Order", "shop", "orders").execute(&layout).unwrap();
		command("Invoice", "shop", "invoices").execute(&layout).unwrap();

		// Assert
		let content = std::fs::read_to_string(project.path().join("shop/models.py")).unwrap();
		assert_eq!(content.matches(TIMEZONE_IMPORT).count(), 1);
		assert!(content.contains("class Order(models.Model):"));
		assert!(content.contains("class Invoice(models.Model):"));
	}

	#[rstest]
	fn test_add_model_separates_unterminated_file(project: TempDir) {
		// Arrange
		let models = project.path().join("shop/models.py");
		std::fs::write(&models, "from django.db import models").unwrap();
		let layout = ProjectLayout::new(project.path());

		// Act
		command("Order", "shop", "orders").execute(&layout).unwrap();

		// Assert
		let content = std::fs::read_to_string(&models).unwrap();
		assert!(content.contains("from django.db import models\n\nclass Order"));
	}

	#[rstest]
	#[case("", "shop", "orders")]
	#[case("Order", " ", "orders")]
	#[case("Order", "shop", "")]
	#[case("Order Item", "shop", "orders")]
	#[case("Order", "shop", "orders\"\nimport os")]
	fn test_add_model_validation(
		project: TempDir,
		#[case] model: &str,
		#[case] app: &str,
		#[case] table: &str,
	) {
		// Arrange
		let layout = ProjectLayout::new(project.path());
		let before = std::fs::read_to_string(project.path().join("shop/models.py")).unwrap();

		// Act
		let result = command(model, app, table).execute(&layout);

		// Assert
		assert!(matches!(result, Err(CommandError::Validation(_))));
		let after = std::fs::read_to_string(project.path().join("shop/models.py")).unwrap();
		assert_eq!(before, after);
	}

	#[rstest]
	#[case("..")]
	#[case("../shop")]
	fn test_add_model_rejects_app_outside_root(project: TempDir, #[case] app: &str) {
		// Arrange
		let site = project.path().join("site");
		std::fs::create_dir(&site).unwrap();
		std::fs::copy(project.path().join("shop/models.py"), project.path().join("models.py")).unwrap();
		let layout = ProjectLayout::new(&site);
		let before = std::fs::read_to_string(project.path().join("shop/models.py")).unwrap();

		// Act
		let result = command("Order", app, "orders").execute(&layout);

		// Assert
		assert!(matches!(result, Err(CommandError::Validation(_))));
		assert_eq!(
			std::fs::read_to_string(project.path().join("shop/models.py")).unwrap(),
			before
		);
		assert_eq!(std::fs::read_to_string(project.path().join("models.py")).unwrap(), before);
	}

	#[rstest]
	fn test_add_model_unknown_app(project: TempDir) {
		let layout = ProjectLayout::new(project.path());

		let result = command("Order", "blog", "orders").execute(&layout);

		assert!(matches!(result, Err(CommandError::NotFound(_))));
	}

	#[rstest]
	fn test_add_model_missing_models_file(project: TempDir) {
		// Arrange
		std::fs::remove_file(project.path().join("shop/models.py")).unwrap();
		let layout = ProjectLayout::new(project.path());

		// Act
		let result = command("Order", "shop", "orders").execute(&layout);

		// Assert
		match result {
			Err(CommandError::NotFound(msg)) => assert!(msg.contains("models.py")),
			other => panic!("expected NotFound, got {:?}", other),
		}
	}
}
