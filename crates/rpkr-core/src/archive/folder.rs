//! Folder artifacts.
//!
//! Files are copied to `output/<matched path>`, which reproduces the input
//! directory inside the output when packaging from anywhere but the project
//! root. The rehoming pass then lifts `output/<input>/*` up into `output/`.

use std::fs as stdfs;
use std::io;
use std::path::{Path, PathBuf};

use rpkr_schema::{MANIFEST_FILE, PackMeta};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use super::{ArchiveOutcome, SelectedFile};
use crate::error::PackError;
use crate::reporter::Reporter;

/// Build a folder artifact at `output`. `nested` is the input directory
/// relative to the project root; it is lifted into `output` once every file
/// has been copied.
///
/// # Errors
///
/// Fails only when the manifest cannot be written; copy and rehome failures
/// are reported and produce an unsuccessful outcome.
pub async fn build(
    output: &Path,
    nested: &Path,
    files: &[SelectedFile],
    manifest: Option<&PackMeta>,
    reporter: &dyn Reporter,
) -> Result<ArchiveOutcome, PackError> {
    if let Some(meta) = manifest {
        write_manifest(output, meta).await?;
        reporter.info(&format!("Created automatic {MANIFEST_FILE} file"));
    } else if let Err(e) = fs::create_dir_all(output).await {
        reporter.error(&format!("Cannot create {}: {e}", output.display()));
        return Ok(ArchiveOutcome::failed(0));
    }

    let mut copied = 0;
    for file in files {
        let dest = output.join(&file.matched);
        if let Err(e) = copy_file(&file.source, &dest).await {
            reporter.error(&format!(
                "Cannot copy {} to {}: {e}",
                file.source.display(),
                dest.display()
            ));
            return Ok(ArchiveOutcome::failed(copied));
        }
        copied += 1;
    }
    debug!(copied, output = %output.display(), "copied selected files");

    if !nested.as_os_str().is_empty() {
        let nested = nested.to_path_buf();
        let target = output.to_path_buf();
        let moved = tokio::task::spawn_blocking(move || rehome(&target, &nested))
            .await
            .map_err(io::Error::other)
            .and_then(|result| result);
        match moved {
            Ok(moved) => debug!(moved, "rehomed input directory"),
            Err(e) => {
                reporter.error(&format!("Cannot move files into {}: {e}", output.display()));
                return Ok(ArchiveOutcome::failed(copied));
            }
        }
    }

    Ok(ArchiveOutcome {
        success: true,
        files: copied,
    })
}

/// Create `output` and write the manifest directly under it.
async fn write_manifest(output: &Path, meta: &PackMeta) -> Result<(), PackError> {
    let path = output.join(MANIFEST_FILE);
    let content = meta.to_json()?;
    fs::create_dir_all(output)
        .await
        .map_err(|source| PackError::ManifestWrite {
            path: path.clone(),
            source,
        })?;
    fs::write(&path, content)
        .await
        .map_err(|source| PackError::ManifestWrite { path, source })
}

async fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(source, dest).await?;
    Ok(())
}

/// Move everything under `output/nested` up into `output`, replacing files
/// left by earlier runs, and remove the emptied `nested` chain.
///
/// The nested tree is first renamed to a staging directory so an input
/// directory that contains a folder of its own name cannot collide with
/// itself. Returns the number of files moved.
pub fn rehome(output: &Path, nested: &Path) -> io::Result<usize> {
    let source = output.join(nested);
    if nested.as_os_str().is_empty() || !source.is_dir() {
        return Ok(0);
    }

    let staging = output.join(format!(".rpkr-rehome-{}", std::process::id()));
    if staging.exists() {
        stdfs::remove_dir_all(&staging)?;
    }
    stdfs::rename(&source, &staging)?;
    prune_empty_parents(output, &source);

    let entries = WalkDir::new(&staging)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let mut moved = 0;
    for entry in entries {
        let rel = entry
            .path()
            .strip_prefix(&staging)
            .map_err(io::Error::other)?;
        let dest: PathBuf = output.join(rel);

        if entry.file_type().is_dir() {
            stdfs::create_dir_all(&dest)?;
            continue;
        }
        if dest.is_file() {
            stdfs::remove_file(&dest)?;
        }
        stdfs::rename(entry.path(), &dest)?;
        moved += 1;
    }

    stdfs::remove_dir_all(&staging)?;
    Ok(moved)
}

/// Remove now-empty ancestors of `removed` up to (excluding) `output`.
fn prune_empty_parents(output: &Path, removed: &Path) {
    let mut dir = removed.parent();
    while let Some(d) = dir {
        if d == output || !d.starts_with(output) || stdfs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
}
