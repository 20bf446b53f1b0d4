//! Status line formatting

use colored::Colorize;
use scaffolder_commands::{Outcome, Status};

/// Print a success message
pub(crate) fn success(msg: &str) {
	println!("{} {}", "✓".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
	println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an error message
pub(crate) fn error(msg: &str) {
	eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print the single status line for a finished command.
pub(crate) fn outcome(outcome: &Outcome) {
	match outcome.status {
		Status::Success => success(&outcome.message),
		Status::Warning => warning(&outcome.message),
	}
}
