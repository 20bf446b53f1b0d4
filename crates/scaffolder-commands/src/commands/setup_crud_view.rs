//! setup-crud-view: generate a ViewSet and its CRUD serializers

use super::{Outcome, ScaffoldCommand, create_file, require_absent, require_app, required};
use crate::CommandResult;
use crate::layout::ProjectLayout;
use crate::naming::ViewName;
use crate::template::{TemplateContext, TemplateKind, render};

/// Writes `<app>/serializers/<base>_serializer.py` and `<app>/views/<view>.py`.
#[derive(Debug, Clone)]
pub struct SetupCrudViewCommand {
	/// Must end with `_view`, e.g. `order_view`.
	pub view_name: String,
	pub app_name: String,
}

impl ScaffoldCommand for SetupCrudViewCommand {
	fn name(&self) -> &str {
		"setup-crud-view"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let view = ViewName::parse(&self.view_name)?;
		let app_name = required(&self.app_name, "App name is required")?.to_lowercase();
		require_app(layout, &app_name)?;

		let app_dir = layout.app_dir(&app_name);
		let view_path = app_dir.join("views").join(format!("{}.py", view.as_str()));
		let serializer_path = app_dir
			.join("serializers")
			.join(format!("{}.py", view.serializer_module()));
		require_absent(
			&view_path,
			format!("View '{}' already exists.", view.as_str()),
		)?;
		require_absent(
			&serializer_path,
			format!("Serializer '{}' already exists.", view.serializer_module()),
		)?;

		let serializer_ctx = TemplateContext::new().with("class_base", view.class_base())?;
		let serializers = render(TemplateKind::CrudSerializers, &serializer_ctx)?;

		let viewset_ctx = serializer_ctx
			.with("serializer_module", view.serializer_module())?
			.with("viewset_name", view.viewset_name())?;
		let viewset = render(TemplateKind::CrudViewSet, &viewset_ctx)?;

		create_file(&serializer_path, &serializers)?;
		create_file(&view_path, &viewset)?;

		Ok(Outcome::success(format!(
			"ViewSet and serializers for '{}' created successfully.",
			view.as_str()
		)))
	}
}
