//! Identifier derivation for generated class and module names
//!
//! Scaffolded files name their classes after the snake_case input the user
//! typed (`user_profile_view` becomes `UserProfileView`). Everything here is
//! pure string manipulation.

use crate::{CommandError, CommandResult};

/// Suffix every CRUD view name must carry.
pub const VIEW_SUFFIX: &str = "_view";

/// Class-name suffix removed to obtain the serializer base name.
const VIEW_CLASS_SUFFIX: &str = "View";

/// Convert a snake_case name to PascalCase.
///
/// Each `_`-separated segment is capitalized (first character upper case,
/// the rest lower case). Empty segments produced by consecutive underscores
/// are dropped.
///
/// # Examples
///
/// ```rust
/// use scaffolder_commands::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("user_profile_view"), "UserProfileView");
/// assert_eq!(to_pascal_case("order__item"), "OrderItem");
/// ```
pub fn to_pascal_case(name: &str) -> String {
	name.split('_').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
	let mut chars = segment.chars();
	match chars.next() {
		None => String::new(),
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
	}
}

/// Strip a trailing suffix from a PascalCase class name.
///
/// Only a suffix at the very end is removed; inner occurrences are kept.
pub fn strip_class_suffix<'a>(class_name: &'a str, suffix: &str) -> &'a str {
	class_name.strip_suffix(suffix).unwrap_or(class_name)
}

/// Check that `name` is a valid Python identifier.
///
/// `kind` names the input in the error message ("App name", "Model name").
pub fn validate_identifier(kind: &str, name: &str) -> CommandResult<()> {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return Err(CommandError::Validation(format!("{} is required.", kind)));
	};

	if !(first.is_alphabetic() || first == '_') || !chars.all(|c| c.is_alphanumeric() || c == '_')
	{
		return Err(CommandError::Validation(format!(
			"Invalid {} '{}'. It must contain only letters, numbers, and underscores, and cannot start with a number.",
			kind.to_lowercase(),
			name
		)));
	}

	Ok(())
}

/// Check that `value` can sit inside a Python string literal unescaped.
///
/// Quotes, backslashes and control characters are rejected.
pub fn validate_string_literal(kind: &str, value: &str) -> CommandResult<()> {
	if let Some(bad) = value
		.chars()
		.find(|&c| matches!(c, '"' | '\'' | '\\') || c.is_control())
	{
		return Err(CommandError::Validation(format!(
			"Invalid {} {:?}: {:?} is not allowed.",
			kind.to_lowercase(),
			value,
			bad
		)));
	}
	Ok(())
}

/// A validated CRUD view name such as `order_view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewName {
	name: String,
	class_base: String,
}

impl ViewName {
	/// Parse user input into a view name.
	///
	/// The input is trimmed and lowercased. It must contain an underscore,
	/// end with `_view`, and leave a non-empty class name once the suffix
	/// is stripped.
	pub fn parse(input: &str) -> CommandResult<Self> {
		let name = input.trim().to_lowercase();
		if name.is_empty() {
			return Err(CommandError::Validation("View name is required".to_string()));
		}

		if !name.contains('_') || !name.ends_with(VIEW_SUFFIX) {
			return Err(CommandError::Validation(format!(
				"View name should contain at least one underscore and should end with '{}'.",
				VIEW_SUFFIX
			)));
		}
		validate_identifier("View name", &name)?;

		let pascal = to_pascal_case(&name);
		let class_base = strip_class_suffix(&pascal, VIEW_CLASS_SUFFIX).to_string();
		if class_base.is_empty() {
			return Err(CommandError::Validation(format!(
				"View name '{}' has nothing before '{}'.",
				name, VIEW_SUFFIX
			)));
		}

		Ok(Self { name, class_base })
	}

	/// The normalized view name, also the view module name.
	pub fn as_str(&self) -> &str {
		&self.name
	}

	/// Module prefix for the serializer file (`order` for `order_view`).
	pub fn module_base(&self) -> &str {
		self.name.strip_suffix(VIEW_SUFFIX).unwrap_or(&self.name)
	}

	/// Serializer module name (`order_serializer`).
	pub fn serializer_module(&self) -> String {
		format!("{}_serializer", self.module_base())
	}

	/// Class-name stem shared by the serializers (`Order`).
	pub fn class_base(&self) -> &str {
		&self.class_base
	}

	/// ViewSet class name (`OrderViewViewSet`).
	pub fn viewset_name(&self) -> String {
		format!("{}ViewSet", to_pascal_case(&self.name))
	}
}
