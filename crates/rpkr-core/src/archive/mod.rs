//! Artifact assembly.
//!
//! An [`ArchiveBuilder`] expands the localized selectors against the project
//! root and produces either a directory tree ([`folder`]) or a deflated zip
//! file ([`zipfile`]). Both modes place the generated manifest at the
//! artifact root and lay files out relative to the input directory.

pub mod folder;
pub mod zipfile;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use rpkr_schema::{MANIFEST_FILE, PackMeta};
use tracing::debug;

use crate::error::PackError;
use crate::paths::{input_dir, mirror_path, strip_dot_prefix};
use crate::reporter::Reporter;

/// Kind of artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    /// A plain directory at `output/`.
    Folder,
    /// A zip file at `output.zip`.
    Zip,
}

/// A file picked by the selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Path on disk.
    pub source: PathBuf,
    /// Path relative to the project root as the selector matched it,
    /// including the input directory prefix.
    pub matched: PathBuf,
    /// Path relative to the input directory; where the file ends up inside
    /// the artifact.
    pub entry: PathBuf,
}

/// Result of expanding all selectors.
#[derive(Debug, Default)]
pub struct Selection {
    /// Matched files, de-duplicated, in first-match order.
    pub files: Vec<SelectedFile>,
    /// Paths that could not be inspected while expanding.
    pub errors: Vec<String>,
}

/// Outcome of a build, before the summary is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Whether every file made it into the artifact.
    pub success: bool,
    /// Number of selected files written (the generated manifest excluded).
    pub files: usize,
}

impl ArchiveOutcome {
    pub(crate) fn failed(files: usize) -> Self {
        Self {
            success: false,
            files,
        }
    }
}

/// Expand `selectors` against `root`.
///
/// Only regular files are returned. Dotfiles are matched only by patterns
/// that spell the leading dot, `*` never crosses a `/` and `**` matches zero
/// or more directories.
///
/// # Errors
///
/// Returns [`PackError::Selector`] for a selector that is not a valid glob.
pub fn select_files(root: &Path, selectors: &[String], input: &str) -> Result<Selection, PackError> {
    let base_dir = input_dir(root, input);
    let base = glob::Pattern::escape(&root.to_string_lossy());
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut seen = HashSet::new();
    let mut selection = Selection::default();

    for selector in selectors {
        let selector = strip_dot_prefix(selector);
        let pattern = if Path::new(selector).is_absolute() {
            selector.to_string()
        } else {
            format!("{base}/{selector}")
        };

        let paths = glob::glob_with(&pattern, options).map_err(|source| PackError::Selector {
            selector: selector.to_string(),
            source,
        })?;

        for path in paths {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    selection.errors.push(e.to_string());
                    continue;
                }
            };
            if !path.is_file() || !seen.insert(path.clone()) {
                continue;
            }
            let matched = mirror_path(path.strip_prefix(root).unwrap_or(&path));
            let entry = matched
                .strip_prefix(&base_dir)
                .map_or_else(|_| matched.clone(), Path::to_path_buf);
            selection.files.push(SelectedFile {
                source: path,
                matched,
                entry,
            });
        }
    }

    debug!(
        selectors = selectors.len(),
        files = selection.files.len(),
        "expanded file selectors"
    );
    Ok(selection)
}

/// Output path as shown in the summary line: one trailing `/` or `.zip`
/// removed, then `.zip` or `/` appended for the mode.
pub fn display_output(output: &str, mode: ArchiveMode) -> String {
    let base = output
        .strip_suffix('/')
        .or_else(|| output.strip_suffix(".zip"))
        .unwrap_or(output);
    match mode {
        ArchiveMode::Zip => format!("{base}.zip"),
        ArchiveMode::Folder => format!("{base}/"),
    }
}

/// Assembles one artifact.
pub struct ArchiveBuilder<'a> {
    root: &'a Path,
    input: &'a str,
    output: &'a str,
    mode: ArchiveMode,
    reporter: &'a dyn Reporter,
}

impl std::fmt::Debug for ArchiveBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("root", &self.root)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'a> ArchiveBuilder<'a> {
    /// Create a builder. `input` and `output` are resolved against `root`
    /// unless absolute.
    pub fn new(
        root: &'a Path,
        input: &'a str,
        output: &'a str,
        mode: ArchiveMode,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            root,
            input,
            output,
            mode,
            reporter,
        }
    }

    /// Where the artifact is written: `output/` or `output.zip`.
    pub fn artifact_path(&self) -> PathBuf {
        match self.mode {
            ArchiveMode::Folder => self.root.join(self.output),
            ArchiveMode::Zip => self.root.join(format!("{}.zip", self.output)),
        }
    }

    /// Produce the artifact.
    ///
    /// I/O failures while copying or archiving are reported and yield an
    /// unsuccessful outcome.
    ///
    /// # Errors
    ///
    /// Fails on an invalid selector or when the manifest cannot be written.
    pub async fn build(
        &self,
        selectors: &[String],
        manifest: Option<&PackMeta>,
    ) -> Result<ArchiveOutcome, PackError> {
        let mut selection = select_files(self.root, selectors, self.input)?;

        // A generated manifest replaces the source one.
        if manifest.is_some() {
            selection.files.retain(|file| {
                let is_source_manifest = file.entry == Path::new(MANIFEST_FILE);
                if is_source_manifest {
                    debug!(source = %file.source.display(), "skipping source manifest");
                }
                !is_source_manifest
            });
        }

        for err in &selection.errors {
            self.reporter.error(err);
        }
        let selection_ok = selection.errors.is_empty();

        let outcome = match self.mode {
            ArchiveMode::Folder => {
                folder::build(
                    &self.artifact_path(),
                    &input_dir(self.root, self.input),
                    &selection.files,
                    manifest,
                    self.reporter,
                )
                .await?
            }
            ArchiveMode::Zip => {
                zipfile::build(
                    self.root,
                    &self.artifact_path(),
                    &selection.files,
                    manifest,
                    self.reporter,
                )
                .await?
            }
        };

        Ok(ArchiveOutcome {
            success: outcome.success && selection_ok,
            files: outcome.files,
        })
    }
}
