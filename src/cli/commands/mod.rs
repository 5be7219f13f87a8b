//! CLI command implementations.

pub mod filters;
pub mod schedule;
pub mod search;
pub mod show;

use crate::core::guide::Guide;
use crate::models::config;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the guide snapshot named on the command line, or the configured one.
pub fn load_guide(guide_file: Option<&Path>) -> Result<Guide> {
    let config = config::load_config();
    let path = guide_file.unwrap_or(&config.guide_file);

    Guide::load_snapshot_file(path, config.display.clone())
        .with_context(|| format!("Failed to load guide: {}", path.display()))
}
