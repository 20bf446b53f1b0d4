//! set-secret-key: generate a secret key and store it in the secrets file

use rand::Rng;

use super::{Outcome, ScaffoldCommand};
use crate::layout::ProjectLayout;
use crate::patch::{Upsert, patch_file};
use crate::{CommandError, CommandResult};

const SECRET_KEY_LENGTH: usize = 50;
const SECRET_KEY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*(-_=+)";

/// Generate a Django-compatible secret key.
///
/// 50 characters drawn from lowercase letters, digits and `!@#$%^&*(-_=+)`;
/// none of them is a quote, so the key can be single-quoted in a `.env` file.
pub fn generate_secret_key() -> String {
	let mut rng = rand::rng();
	(0..SECRET_KEY_LENGTH)
		.map(|_| {
			let idx = rng.random_range(0..SECRET_KEY_CHARS.len());
			SECRET_KEY_CHARS[idx] as char
		})
		.collect()
}

/// Upserts the secret key line in the project's secrets file.
#[derive(Debug, Clone, Default)]
pub struct SetSecretKeyCommand {
	/// Fixed key to write instead of a generated one.
	pub secret_key: Option<String>,
}

impl ScaffoldCommand for SetSecretKeyCommand {
	fn name(&self) -> &str {
		"set-secret-key"
	}

	fn execute(&self, layout: &ProjectLayout) -> CommandResult<Outcome> {
		let env_path = layout.env_path();
		if !env_path.is_file() {
			return Err(CommandError::NotFound(format!(
				"{} file not found. Please create a {} file before running this command.",
				layout.env_file.display(),
				layout.env_file.display()
			)));
		}

		let secret_key = match &self.secret_key {
			Some(key) if key.trim().is_empty() || key.contains(['\'', '\n']) => {
				return Err(CommandError::Validation(
					"Secret key must be non-empty and contain no quotes or newlines.".to_string(),
				));
			}
			Some(key) => key.clone(),
			None => generate_secret_key(),
		};

		let upsert = patch_file(&env_path, |buffer| {
			buffer.upsert_key(&layout.secret_key_name, &secret_key)
		})?;
		match upsert {
			Upsert::Replaced(index) => {
				tracing::debug!(line = index + 1, "replaced existing {}", layout.secret_key_name)
			}
			Upsert::Appended => tracing::debug!("appended {}", layout.secret_key_name),
		}

		Ok(Outcome::success("Secret key set successfully."))
	}
}
