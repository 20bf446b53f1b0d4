//! Template rendering for generated source files
//!
//! Rendering is a pure function of a [`TemplateKind`] and a
//! [`TemplateContext`]: no file is read or written here. Values are inserted
//! verbatim (autoescaping is off), so callers validate identifiers before
//! building the context.

use std::collections::BTreeMap;

use tera::{Context, Tera};

use crate::embedded_templates::TemplateAssets;
use crate::{CommandError, CommandResult};

/// The fixed set of scaffold templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
	/// Model class appended to an app's `models.py`.
	Model,
	/// `apps.py` of a new app.
	AppConfig,
	/// `admin.py` of a new app.
	AppAdmin,
	/// `models.py` of a new app.
	AppModels,
	/// `tests.py` of a new app.
	AppTests,
	/// Generic function-view module.
	View,
	/// ViewSet wired to the CRUD serializers.
	CrudViewSet,
	/// List/Create/Retrieve/Update/Destroy serializer classes.
	CrudSerializers,
	/// Blank management command.
	Command,
}

impl TemplateKind {
	/// Name of the embedded template file.
	pub fn file_name(self) -> &'static str {
		match self {
			Self::Model => "model.py.tera",
			Self::AppConfig => "app_config.py.tera",
			Self::AppAdmin => "app_admin.py.tera",
			Self::AppModels => "app_models.py.tera",
			Self::AppTests => "app_tests.py.tera",
			Self::View => "view.py.tera",
			Self::CrudViewSet => "crud_viewset.py.tera",
			Self::CrudSerializers => "crud_serializers.py.tera",
			Self::Command => "command.py.tera",
		}
	}

	/// Placeholders that must be present in the context.
	pub fn placeholders(self) -> &'static [&'static str] {
		match self {
			Self::Model => &["model_name", "table_name"],
			Self::AppConfig => &["app_name", "app_config_class"],
			Self::CrudViewSet => &["serializer_module", "class_base", "viewset_name"],
			Self::CrudSerializers => &["class_base"],
			Self::AppAdmin | Self::AppModels | Self::AppTests | Self::View | Self::Command => &[],
		}
	}
}

/// Placeholder values for a template.
///
/// Every value is non-empty after trimming; [`TemplateContext::insert`]
/// rejects blank values.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
	variables: BTreeMap<String, String>,
}

impl TemplateContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> CommandResult<()> {
		let key = key.into();
		let value = value.into();
		if value.trim().is_empty() {
			return Err(CommandError::Validation(format!(
				"Template value '{}' must not be empty",
				key
			)));
		}
		self.variables.insert(key, value);
		Ok(())
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> CommandResult<Self> {
		self.insert(key, value)?;
		Ok(self)
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.variables.get(key).map(String::as_str)
	}
}

impl From<&TemplateContext> for Context {
	fn from(ctx: &TemplateContext) -> Self {
		let mut context = Context::new();
		for (key, value) in &ctx.variables {
			context.insert(key.as_str(), value);
		}
		context
	}
}

/// Render `kind` with the given context.
///
/// # Errors
///
/// Returns [`CommandError::Validation`] if a placeholder the template needs
/// is missing, or [`CommandError::Template`] if tera fails.
///
/// # Examples
///
/// ```rust
/// use scaffolder_commands::template::{TemplateContext, TemplateKind, render};
///
/// let ctx = TemplateContext::new().with("class_base", "Order")?;
/// let source = render(TemplateKind::CrudSerializers, &ctx)?;
/// assert!(source.contains("class CreateOrderSerializer"));
/// # Ok::<(), scaffolder_commands::CommandError>(())
/// ```
pub fn render(kind: TemplateKind, ctx: &TemplateContext) -> CommandResult<String> {
	if let Some(missing) = kind
		.placeholders()
		.iter()
		.find(|name| ctx.get(name).is_none())
	{
		return Err(CommandError::Validation(format!(
			"Template '{}' requires a value for '{}'",
			kind.file_name(),
			missing
		)));
	}

	let tera = load_template(kind)?;
	let rendered = tera.render(kind.file_name(), &Context::from(ctx))?;
	Ok(rendered)
}

/// Load a single embedded template into a fresh tera instance.
fn load_template(kind: TemplateKind) -> CommandResult<Tera> {
	let name = kind.file_name();
	let file = TemplateAssets::get(name).ok_or_else(|| {
		CommandError::NotFound(format!("embedded template not found: {}", name))
	})?;
	let content = std::str::from_utf8(file.data.as_ref()).map_err(|e| {
		CommandError::Validation(format!("invalid UTF-8 in template {}: {}", name, e))
	})?;

	let mut tera = Tera::default();
	tera.autoescape_on(Vec::new());
	tera.add_raw_template(name, content)?;
	Ok(tera)
}
