//! Embedded template files using rust-embed
//!
//! Every scaffold template is compiled into the binary so the tool works
//! from any directory.

use rust_embed::RustEmbed;

/// Embedded template directory
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct TemplateAssets;
