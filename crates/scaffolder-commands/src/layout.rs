//! Project layout configuration
//!
//! Describes where the commands find settings files, the secrets file,
//! apps and the management-command package. Defaults match the standard
//! project skeleton; a `scaffold.toml` at the project root overrides any
//! field.
//!
//! ```toml
//! settings_dir = "config/settings"
//! settings_profiles = ["dev", "production"]
//! protected_apps = ["custom_commands", "core"]
//! migrate_command = ["poetry", "run", "python", "manage.py", "migrate"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CommandError, CommandResult};

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "scaffold.toml";

/// Filesystem layout of the project being scaffolded.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectLayout {
	/// Project root; apps live directly below it.
	#[serde(skip)]
	pub root: PathBuf,
	/// Directory holding the settings modules, relative to the root.
	pub settings_dir: PathBuf,
	/// Settings module names (without `.py`) patched by create-app and remove-app.
	pub settings_profiles: Vec<String>,
	/// Secrets file updated by set-secret-key, relative to the root.
	pub env_file: PathBuf,
	/// Key written by set-secret-key.
	pub secret_key_name: String,
	/// Marker locating the installed-apps list in settings files.
	pub installed_apps_marker: String,
	/// Apps that remove-app and create-app refuse to touch.
	pub protected_apps: Vec<String>,
	/// Where create-command writes new commands, relative to the root.
	pub commands_dir: PathBuf,
	/// Program and leading arguments used to roll back migrations.
	pub migrate_command: Vec<String>,
}

impl Default for ProjectLayout {
	fn default() -> Self {
		Self {
			root: PathBuf::from("."),
			settings_dir: PathBuf::from("project/settings"),
			settings_profiles: ["local", "dev", "qa", "production"]
				.into_iter()
				.map(String::from)
				.collect(),
			env_file: PathBuf::from(".env"),
			secret_key_name: "DJANGO_SECRET_KEY".to_string(),
			installed_apps_marker: "INSTALLED_APPS".to_string(),
			protected_apps: vec!["custom_commands".to_string()],
			commands_dir: PathBuf::from("custom_commands/management/commands"),
			migrate_command: ["python", "manage.py", "migrate"]
				.into_iter()
				.map(String::from)
				.collect(),
		}
	}
}

impl ProjectLayout {
	/// Default layout rooted at `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			..Self::default()
		}
	}

	/// Load the layout for `root`, reading `scaffold.toml` when present.
	pub fn load(root: impl Into<PathBuf>) -> CommandResult<Self> {
		let root = root.into();
		let config_path = root.join(CONFIG_FILE_NAME);
		if !config_path.is_file() {
			tracing::debug!(root = %root.display(), "no {} found, using defaults", CONFIG_FILE_NAME);
			return Ok(Self::new(root));
		}

		let content =
			std::fs::read_to_string(&config_path).map_err(|e| CommandError::io(&config_path, e))?;
		let mut layout = Self::from_toml(&content)?;
		layout.root = root;
		tracing::debug!(path = %config_path.display(), "loaded project layout");
		Ok(layout)
	}

	/// Parse a layout from TOML text; `root` is left at its default.
	pub fn from_toml(content: &str) -> CommandResult<Self> {
		let layout: Self =
			toml::from_str(content).map_err(|e| CommandError::Config(e.to_string()))?;
		if layout.migrate_command.is_empty() {
			return Err(CommandError::Config(
				"migrate_command must name a program".to_string(),
			));
		}
		Ok(layout)
	}

	pub fn app_dir(&self, app_name: &str) -> PathBuf {
		self.root.join(app_name)
	}

	/// Settings files in profile order.
	pub fn settings_files(&self) -> Vec<PathBuf> {
		self.settings_profiles
			.iter()
			.map(|profile| self.root.join(&self.settings_dir).join(format!("{}.py", profile)))
			.collect()
	}

	pub fn env_path(&self) -> PathBuf {
		self.root.join(&self.env_file)
	}

	pub fn commands_path(&self) -> PathBuf {
		self.root.join(&self.commands_dir)
	}

	/// Top-level package holding the settings modules (`project` by default).
	pub fn settings_package(&self) -> Option<&str> {
		self.settings_dir.components().find_map(|component| match component {
			std::path::Component::Normal(name) => name.to_str(),
			_ => None,
		})
	}

	/// Whether create-app and remove-app must leave `app_name` alone.
	///
	/// Covers the configured protected apps and the settings package.
	pub fn is_protected(&self, app_name: &str) -> bool {
		self.protected_apps.iter().any(|name| name == app_name)
			|| self.settings_package() == Some(app_name)
	}

	/// Whether `app_name` is listed in the installed-apps list of any settings file.
	pub fn is_registered(&self, app_name: &str) -> bool {
		let single = format!("'{}'", app_name);
		let double = format!("\"{}\"", app_name);
		self.settings_files().iter().any(|path| {
			let Ok(buffer) = crate::patch::LineBuffer::read(path) else {
				return false;
			};
			let Ok(region) = buffer.find_list_region(&self.installed_apps_marker, ']') else {
				return false;
			};
			buffer.lines()[region.start..region.end]
				.iter()
				.any(|line| line.contains(&single) || line.contains(&double))
		})
	}

	/// Display a path relative to the project root where possible.
	pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
		path.strip_prefix(&self.root).unwrap_or(path).display()
	}
}
