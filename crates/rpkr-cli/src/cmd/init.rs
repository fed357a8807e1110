//! Init command

use std::sync::Arc;

use anyhow::{Context, Result};
use rpkr_core::Packer;
use rpkr_schema::CONFIG_FILE;

use crate::ui::Output;

/// Whether `init` should overwrite: the `--force` flag, or a positional
/// argument starting with `f` after any leading dashes (`force`, `-f`).
pub fn wants_force(flag: bool, positional: Option<&str>) -> bool {
    flag || positional.is_some_and(|arg| arg.trim_start_matches('-').starts_with('f'))
}

/// Write `.rpkr.json` with default settings into the current directory.
pub async fn init(force: bool) -> Result<()> {
    let root = std::env::current_dir().context("Cannot determine the current directory")?;
    let packer = Packer::new(root, Arc::new(Output::new()));

    let outcome = packer
        .init(force)
        .await
        .with_context(|| format!("Failed to initialise {CONFIG_FILE}"))?;
    tracing::debug!(?outcome, "init finished");
    Ok(())
}
