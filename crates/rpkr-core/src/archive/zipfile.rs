//! Zip artifacts.
//!
//! The manifest is staged in a temporary file next to the project, the
//! archive is written on a blocking worker, and the temporary manifest is
//! removed only after that worker has finished with it.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rpkr_schema::{MANIFEST_FILE, PackMeta};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ArchiveOutcome, SelectedFile};
use crate::error::PackError;
use crate::paths::entry_name;
use crate::reporter::Reporter;

/// Deflate level used for every entry.
const COMPRESSION_LEVEL: i64 = 9;

/// Prefix of the staged manifest inside the project root.
pub const TEMP_MANIFEST_PREFIX: &str = ".rpkr-pack-";

/// One file to store in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// File on disk.
    pub source: PathBuf,
    /// `/`-separated name inside the archive.
    pub name: String,
}

/// Build a zip artifact at `zip_path`.
///
/// # Errors
///
/// Fails only when the temporary manifest cannot be written; archive
/// failures are reported and produce an unsuccessful outcome.
pub async fn build(
    root: &Path,
    zip_path: &Path,
    files: &[SelectedFile],
    manifest: Option<&PackMeta>,
    reporter: &dyn Reporter,
) -> Result<ArchiveOutcome, PackError> {
    let staged = match manifest {
        Some(meta) => Some(stage_manifest(root, meta)?),
        None => None,
    };

    if zip_path.exists() {
        reporter.warning(&format!("Overwriting existing file {}.", zip_path.display()));
    }
    if let Some(parent) = zip_path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            reporter.error(&format!("Cannot create {}: {e}", parent.display()));
            discard_staged(staged, reporter);
            return Ok(ArchiveOutcome::failed(0));
        }
    }

    let entries = entries_for(files);
    let count = entries.len();
    let manifest_path = staged.as_ref().map(|tmp| tmp.path().to_path_buf());
    let target = zip_path.to_path_buf();

    let written = tokio::task::spawn_blocking(move || {
        write_zip(&target, manifest_path.as_deref(), &entries)
    })
    .await;

    // The archive worker is done with the staged manifest only now.
    let cleaned = discard_staged(staged, reporter);

    let success = match written {
        Ok(Ok(n)) => {
            debug!(files = n, zip = %zip_path.display(), "finalized archive");
            cleaned
        }
        Ok(Err(e)) => {
            reporter.error(&format!("Cannot write {}: {e}", zip_path.display()));
            remove_partial(zip_path).await;
            false
        }
        Err(e) => {
            reporter.error(&format!("Archive worker failed: {e}"));
            remove_partial(zip_path).await;
            false
        }
    };

    Ok(ArchiveOutcome {
        success,
        files: if success { count } else { 0 },
    })
}

/// Archive entries for the selected files, one per distinct name.
fn entries_for(files: &[SelectedFile]) -> Vec<ZipEntry> {
    let mut names = HashSet::new();
    files
        .iter()
        .filter_map(|file| {
            let name = entry_name(&file.entry);
            names.insert(name.clone()).then(|| ZipEntry {
                source: file.source.clone(),
                name,
            })
        })
        .collect()
}

/// Write the manifest to a temporary file in `root`.
fn stage_manifest(root: &Path, meta: &PackMeta) -> Result<NamedTempFile, PackError> {
    let content = meta.to_json()?;
    let write = || -> io::Result<NamedTempFile> {
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_MANIFEST_PREFIX)
            .suffix(".mcmeta")
            .tempfile_in(root)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        Ok(tmp)
    };
    write().map_err(|source| PackError::ManifestWrite {
        path: root.join(format!("{TEMP_MANIFEST_PREFIX}*.mcmeta")),
        source,
    })
}

/// Delete the staged manifest, reporting a failure. Returns whether the
/// file is gone.
fn discard_staged(staged: Option<NamedTempFile>, reporter: &dyn Reporter) -> bool {
    let Some(tmp) = staged else {
        return true;
    };
    let path = tmp.path().to_path_buf();
    match tmp.close() {
        Ok(()) => true,
        Err(e) => {
            reporter.error(&format!("Cannot remove {}: {e}", path.display()));
            false
        }
    }
}

async fn remove_partial(zip_path: &Path) {
    if let Err(e) = tokio::fs::remove_file(zip_path).await {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(zip = %zip_path.display(), error = %e, "could not remove partial archive");
        }
    }
}

/// Write a deflated archive: the manifest first (as `pack.mcmeta`), then
/// every entry. Returns the number of entries written, manifest excluded.
///
/// # Errors
///
/// Returns the first I/O or archive error encountered.
pub fn write_zip(zip_path: &Path, manifest: Option<&Path>, entries: &[ZipEntry]) -> ZipResult<usize> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    if let Some(path) = manifest {
        zip.start_file(MANIFEST_FILE, options)?;
        io::copy(&mut File::open(path)?, &mut zip)?;
    }

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)?;
        io::copy(&mut File::open(&entry.source)?, &mut zip)?;
        debug!(entry = %entry.name, "added to archive");
    }

    let mut inner = zip.finish()?;
    inner.flush()?;
    Ok(entries.len())
}
