//! Project Lifecycle Tests
//!
//! End-to-end runs of the scaffolding commands against a throwaway project
//! tree: create an app, fill it in, and remove it again.

use rstest::{fixture, rstest};
use scaffolder_commands::{
	AddModelCommand, CommandError, CreateAppCommand, CreateCommandCommand, CreateViewCommand,
	ProjectLayout, RemoveAppCommand, ScaffoldCommand, SetSecretKeyCommand, SetupCrudViewCommand,
	Status,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BASE_SETTINGS: &str = "\
from .base import *

DEBUG = True

INSTALLED_APPS = [
    'django.contrib.admin',
    'rest_framework',
]

MIDDLEWARE = [
    'django.middleware.security.SecurityMiddleware',
]
";

/// Helper struct for setting up a project tree
struct TestProject {
	temp_dir: TempDir,
}

impl TestProject {
	fn path(&self) -> &Path {
		self.temp_dir.path()
	}

	fn layout(&self) -> ProjectLayout {
		ProjectLayout::load(self.path()).expect("layout should load")
	}

	fn read(&self, relative_path: &str) -> String {
		fs::read_to_string(self.path().join(relative_path))
			.unwrap_or_else(|e| panic!("failed to read {}: {}", relative_path, e))
	}

	fn write(&self, relative_path: &str, content: &str) {
		let path = self.path().join(relative_path);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, content).unwrap();
	}

	fn settings_paths(&self) -> Vec<PathBuf> {
		self.layout().settings_files()
	}

	/// Sorted relative paths of every entry below the project root.
	fn tree(&self) -> Vec<String> {
		let mut entries = Vec::new();
		collect_entries(self.path(), self.path(), &mut entries);
		entries.sort();
		entries
	}
}

fn collect_entries(root: &Path, dir: &Path, entries: &mut Vec<String>) {
	for entry in fs::read_dir(dir).unwrap() {
		let path = entry.unwrap().path();
		entries.push(path.strip_prefix(root).unwrap().display().to_string());
		if path.is_dir() {
			collect_entries(root, &path, entries);
		}
	}
}

#[fixture]
fn project() -> TestProject {
	let project = TestProject {
		temp_dir: TempDir::new().expect("Failed to create temp directory"),
	};
	for profile in ["local", "dev", "qa", "production"] {
		project.write(&format!("project/settings/{}.py", profile), BASE_SETTINGS);
	}
	project.write(".env", "DEBUG=1\nDJANGO_SECRET_KEY='old'\n");
	project
}

#[rstest]
fn test_create_then_remove_app_restores_project(project: TestProject) {
	// Arrange
	let before = project.tree();
	let layout = project.layout();

	// Act
	let created = CreateAppCommand {
		app_name: "shop".into(),
	}
	.execute(&layout)
	.unwrap();
	let removed = RemoveAppCommand {
		skip_migrations: true,
		..RemoveAppCommand::new("shop")
	}
	.execute(&layout)
	.unwrap();

	// Assert
	assert_eq!(created.status, Status::Success);
	assert_eq!(removed.status, Status::Success);
	assert_eq!(project.tree(), before);
	for path in project.settings_paths() {
		assert_eq!(fs::read_to_string(path).unwrap(), BASE_SETTINGS);
	}
}

#[rstest]
fn test_created_app_accepts_models_and_views(project: TestProject) {
	// Arrange
	let layout = project.layout();
	CreateAppCommand {
		app_name: "shop".into(),
	}
	.execute(&layout)
	.unwrap();

	// Act
	AddModelCommand {
		model_name: "Order".into(),
		app_name: "shop".into(),
		table_name: "orders".into(),
	}
	.execute(&layout)
	.unwrap();
	CreateViewCommand {
		app_name: "shop".into(),
		view_name: "dashboard".into(),
	}
	.execute(&layout)
	.unwrap();
	SetupCrudViewCommand {
		view_name: "order_view".into(),
		app_name: "shop".into(),
	}
	.execute(&layout)
	.unwrap();

	// Assert
	let models = project.read("shop/models.py");
	assert!(models.starts_with("from django.utils.timezone import now\n"));
	assert!(models.contains("class Order(models.Model):"));
	assert!(models.contains("db_table = \"orders\""));
	assert!(project.path().join("shop/views/dashboard.py").is_file());
	assert!(project.read("shop/views/order_view.py").contains("class OrderViewViewSet(ViewSet):"));
	assert!(
		project
			.read("shop/serializers/order_serializer.py")
			.contains("class CreateOrderSerializer(serializers.BaseSerializer):")
	);
	assert_eq!(project.read("shop/views/__init__.py"), "");
}

#[rstest]
fn test_settings_patch_only_touches_installed_apps(project: TestProject) {
	// Arrange
	let layout = project.layout();

	// Act
	CreateAppCommand {
		app_name: "billing".into(),
	}
	.execute(&layout)
	.unwrap();

	// Assert
	let dev = project.read("project/settings/dev.py");
	assert!(dev.contains("    'rest_framework',\n    'billing',\n]\n\nMIDDLEWARE = [\n"));
	assert_eq!(dev.matches("'billing'").count(), 1);
}

#[rstest]
fn test_scaffold_toml_redirects_settings_and_secrets(project: TestProject) {
	// Arrange
	project.write(
		"scaffold.toml",
		"settings_dir = \"config\"\nsettings_profiles = [\"base\"]\nenv_file = \"config/.env\"\n",
	);
	project.write("config/base.py", BASE_SETTINGS);
	project.write("config/.env", "");
	let layout = project.layout();

	// Act
	CreateAppCommand {
		app_name: "shop".into(),
	}
	.execute(&layout)
	.unwrap();
	SetSecretKeyCommand::default().execute(&layout).unwrap();

	// Assert
	assert!(project.read("config/base.py").contains("    'shop',\n"));
	assert_eq!(project.read("project/settings/dev.py"), BASE_SETTINGS);
	let env = project.read("config/.env");
	assert!(env.starts_with("DJANGO_SECRET_KEY='"));
	assert_eq!(project.read(".env"), "DEBUG=1\nDJANGO_SECRET_KEY='old'\n");
}

#[rstest]
fn test_set_secret_key_replaces_in_place(project: TestProject) {
	// Arrange
	let layout = project.layout();

	// Act
	SetSecretKeyCommand::default().execute(&layout).unwrap();

	// Assert
	let env = project.read(".env");
	let lines: Vec<&str> = env.lines().collect();
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[0], "DEBUG=1");
	assert!(lines[1].starts_with("DJANGO_SECRET_KEY='"));
	assert_eq!(lines[1].len(), "DJANGO_SECRET_KEY=''".len() + 50);
}

#[rstest]
fn test_create_command_lands_in_commands_package(project: TestProject) {
	// Arrange
	let layout = project.layout();
	let command = CreateCommandCommand {
		command_name: "sync_orders".into(),
	};

	// Act
	command.execute(&layout).unwrap();
	let second = command.execute(&layout);

	// Assert
	assert!(
		project
			.path()
			.join("custom_commands/management/commands/sync_orders.py")
			.is_file()
	);
	assert!(matches!(second, Err(CommandError::Conflict(_))));
}

#[rstest]
fn test_validation_failures_leave_tree_untouched(project: TestProject) {
	// Arrange
	let layout = project.layout();
	let before = project.tree();

	// Act
	let results = [
		CreateAppCommand {
			app_name: "9lives".into(),
		}
		.execute(&layout),
		SetupCrudViewCommand {
			view_name: "order".into(),
			app_name: "shop".into(),
		}
		.execute(&layout),
		AddModelCommand {
			model_name: String::new(),
			app_name: "shop".into(),
			table_name: "orders".into(),
		}
		.execute(&layout),
	];

	// Assert
	for result in results {
		assert!(matches!(result, Err(CommandError::Validation(_))));
	}
	assert_eq!(project.tree(), before);
}
