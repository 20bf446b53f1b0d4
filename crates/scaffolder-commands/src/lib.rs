//! # Scaffolder Commands
//!
//! Scaffolding and settings-patching engine for Django projects.
//!
//! ## Overview
//!
//! Each operation is a [`ScaffoldCommand`] that validates its inputs, checks
//! the project on disk, then renders embedded templates and/or patches
//! existing Python files line by line:
//!
//! - [`AddModelCommand`]: append a timestamped model to `models.py`
//! - [`CreateAppCommand`]: create an app skeleton and register it in settings
//! - [`CreateCommandCommand`]: create a blank management command
//! - [`CreateViewCommand`]: create a generic view module
//! - [`RemoveAppCommand`]: roll back, unregister and delete an app
//! - [`SetSecretKeyCommand`]: write a fresh secret key to the secrets file
//! - [`SetupCrudViewCommand`]: create a ViewSet with its CRUD serializers
//!
//! Where the commands look for settings, secrets and apps is described by
//! [`ProjectLayout`], optionally loaded from `scaffold.toml`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scaffolder_commands::{CreateAppCommand, ProjectLayout, ScaffoldCommand};
//!
//! let layout = ProjectLayout::load(".")?;
//! let outcome = CreateAppCommand { app_name: "shop".into() }.execute(&layout)?;
//! println!("{}", outcome.message);
//! # Ok::<(), scaffolder_commands::CommandError>(())
//! ```

pub mod commands;
mod embedded_templates;
mod error;
pub mod layout;
pub mod naming;
pub mod patch;
pub mod template;

pub use commands::{
	AddModelCommand, CreateAppCommand, CreateCommandCommand, CreateViewCommand, Outcome,
	ReferenceRemoval, RemoveAppCommand, ScaffoldCommand, SetSecretKeyCommand,
	SetupCrudViewCommand, Status, generate_secret_key,
};
pub use error::{CommandError, CommandResult};
pub use layout::ProjectLayout;
