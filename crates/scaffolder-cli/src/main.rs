//! Scaffold Admin CLI
//!
//! Command-line tool that scaffolds Django apps, models, views and
//! management commands, and keeps the project's settings files in step.
//!
//! ## Usage
//!
//! ```bash
//! scaffold-admin create-app shop
//! scaffold-admin add-model Order shop orders
//! scaffold-admin setup-crud-view order_view shop
//! scaffold-admin remove-app shop --skip-migrations
//! scaffold-admin set-secret-key
//! ```
//!
//! Positional arguments that are left out are asked for interactively
//! unless `--noinput` is given.

mod output;
mod prompt;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use scaffolder_commands::naming::ViewName;
use scaffolder_commands::{
	AddModelCommand, CommandResult, CreateAppCommand, CreateCommandCommand, CreateViewCommand,
	Outcome, ProjectLayout, ReferenceRemoval, RemoveAppCommand, ScaffoldCommand,
	SetSecretKeyCommand, SetupCrudViewCommand,
};
use tracing_subscriber::EnvFilter;

use crate::prompt::Prompter;

#[derive(Parser, Debug)]
#[command(name = "scaffold-admin")]
#[command(about = "Django project scaffolding utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Project root containing the apps and settings (defaults to current directory)
	#[arg(long, value_name = "DIRECTORY", default_value = ".", global = true)]
	project_root: PathBuf,

	/// Never prompt; missing arguments are reported as errors
	#[arg(long, global = true)]
	noinput: bool,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Append a timestamped model to an app's models.py
	AddModel {
		/// Model class name
		#[arg(value_name = "MODEL_NAME")]
		model_name: Option<String>,

		/// App that owns the model
		#[arg(value_name = "APP_NAME")]
		app_name: Option<String>,

		/// Database table name
		#[arg(value_name = "TABLE_NAME")]
		table_name: Option<String>,
	},

	/// Create a blank management command
	CreateCommand {
		/// Name of the command module
		#[arg(value_name = "COMMAND_NAME")]
		command_name: Option<String>,
	},

	/// Create a generic view module in an app
	CreateView {
		/// App that owns the view
		#[arg(value_name = "APP_NAME")]
		app_name: Option<String>,

		/// Name of the view module
		#[arg(value_name = "VIEW_NAME")]
		view_name: Option<String>,
	},

	/// Roll back, unregister and delete an app
	RemoveApp {
		/// Name of the app
		#[arg(value_name = "APP_NAME")]
		app_name: Option<String>,

		/// Do not run `migrate <app> zero` first
		#[arg(long)]
		skip_migrations: bool,

		/// Drop every settings line that mentions the app, not just its
		/// INSTALLED_APPS entry
		#[arg(long)]
		purge_references: bool,
	},

	/// Write a freshly generated secret key to the secrets file
	SetSecretKey {
		/// Use this value instead of generating one
		#[arg(long, value_name = "KEY")]
		value: Option<String>,
	},

	/// Create a ViewSet and its CRUD serializers
	SetupCrudView {
		/// View module name, ending in `_view`
		#[arg(value_name = "VIEW_NAME")]
		view_name: Option<String>,

		/// App that owns the view
		#[arg(value_name = "APP_NAME")]
		app_name: Option<String>,
	},

	/// Create a new app and add it to every settings profile
	CreateApp {
		/// Name of the app
		#[arg(value_name = "APP_NAME")]
		app_name: Option<String>,
	},
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbosity);

	match run(cli) {
		Ok(outcome) => output::outcome(&outcome),
		Err(e) => {
			output::error(&e.to_string());
			process::exit(1);
		}
	}
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8) {
	let default_level = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(verbosity > 1)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> CommandResult<Outcome> {
	let layout = ProjectLayout::load(&cli.project_root)?;
	let prompter = Prompter {
		interactive: !cli.noinput,
	};
	let command = build_command(cli.command, &prompter)?;

	tracing::info!(command = command.name(), root = %layout.root.display(), "running");
	command.execute(&layout)
}

/// Turn parsed arguments into a command, prompting for anything missing.
fn build_command(
	command: Commands,
	prompter: &Prompter,
) -> CommandResult<Box<dyn ScaffoldCommand>> {
	let command: Box<dyn ScaffoldCommand> = match command {
		Commands::AddModel {
			model_name,
			app_name,
			table_name,
		} => Box::new(AddModelCommand {
			model_name: prompter.value_or_ask(model_name, "Enter model name:")?,
			app_name: prompter.value_or_ask(app_name, "Enter app name:")?,
			table_name: prompter.value_or_ask(table_name, "Enter table name:")?,
		}),
		Commands::CreateCommand { command_name } => Box::new(CreateCommandCommand {
			command_name: prompter.value_or_ask(command_name, "Enter command name:")?,
		}),
		Commands::CreateView {
			app_name,
			view_name,
		} => Box::new(CreateViewCommand {
			app_name: prompter.value_or_ask(app_name, "Enter the app name:")?,
			view_name: prompter.value_or_ask(view_name, "Enter the view name:")?,
		}),
		Commands::RemoveApp {
			app_name,
			skip_migrations,
			purge_references,
		} => Box::new(RemoveAppCommand {
			app_name: prompter.value_or_ask(app_name, "App name you want to remove:")?,
			skip_migrations,
			references: if purge_references {
				ReferenceRemoval::AllLines
			} else {
				ReferenceRemoval::Scoped
			},
		}),
		Commands::SetSecretKey { value } => Box::new(SetSecretKeyCommand { secret_key: value }),
		Commands::SetupCrudView {
			view_name,
			app_name,
		} => {
			let view_name = prompter.value_or_ask(view_name, "Enter your view name:")?;
			// Reject a bad view name before asking for the app.
			ViewName::parse(&view_name)?;
			Box::new(SetupCrudViewCommand {
				view_name,
				app_name: prompter.value_or_ask(app_name, "Enter your app name:")?,
			})
		}
		Commands::CreateApp { app_name } => Box::new(CreateAppCommand {
			app_name: prompter.value_or_ask(app_name, "Name of the app you want to create:")?,
		}),
	};
	Ok(command)
}
