//! Pack command

use std::sync::Arc;

use anyhow::{Context, Result};
use rpkr_core::{PackOptions, Packer};

use crate::ui::Output;

/// Input, output and mode resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackTarget {
    pub input: String,
    pub output: Option<String>,
    pub zipped: bool,
}

/// Resolve `rpkr pack [INPUT] [OUTPUT]`.
///
/// A single path is the output. An output ending in `.zip` loses the suffix
/// and selects zip mode. Otherwise an explicit output means a folder and no
/// output means a zip; `--zip` and `--folder` override both.
pub fn resolve_target(paths: &[String], zip: bool, folder: bool) -> PackTarget {
    let (input, output) = match paths {
        [] => (".", None),
        [output] => (".", Some(output.as_str())),
        [input, output, ..] => (input.as_str(), Some(output.as_str())),
    };

    let zip_suffix = output.and_then(|o| o.strip_suffix(".zip"));
    let output = zip_suffix.or(output).filter(|o| !o.is_empty());

    let zipped = if zip {
        true
    } else if folder {
        false
    } else {
        zip_suffix.is_some() || output.is_none()
    };

    PackTarget {
        input: if input.is_empty() { "." } else { input }.to_string(),
        output: output.map(ToString::to_string),
        zipped,
    }
}

/// Package the project in the current directory.
pub async fn pack(paths: &[String], zip: bool, folder: bool) -> Result<()> {
    let target = resolve_target(paths, zip, folder);
    let root = std::env::current_dir().context("Cannot determine the current directory")?;
    let packer = Packer::new(root, Arc::new(Output::new()));

    let report = packer
        .pack(
            &target.input,
            target.output.as_deref(),
            PackOptions {
                zipped: target.zipped,
            },
        )
        .await
        .context("Packaging aborted")?;

    tracing::debug!(
        success = report.success,
        files = report.files,
        artifact = %report.artifact.display(),
        "pack finished"
    );
    Ok(())
}
