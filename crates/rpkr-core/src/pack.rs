//! The packaging run: config -> manifest -> selectors -> artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rpkr_schema::Config;
use tracing::info;

use crate::archive::{ArchiveBuilder, ArchiveMode, display_output};
use crate::error::{ConfigError, PackError};
use crate::format::{BuiltinFormatTable, FormatTable};
use crate::label::version_label;
use crate::meta::build_manifest;
use crate::paths::localize;
use crate::reporter::Reporter;
use crate::store::{ConfigStore, InitOutcome};

/// Options supplied by the caller of [`Packer::pack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Produce `output.zip` instead of an `output/` directory.
    pub zipped: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self { zipped: true }
    }
}

/// Result of a packaging run that was not aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    /// Whether every file made it into the artifact.
    pub success: bool,
    /// Location of the artifact on disk.
    pub artifact: PathBuf,
    /// Artifact path as printed in the summary line.
    pub display: String,
    /// Version label derived from the configuration.
    pub version_label: String,
    /// Number of selected files packaged (generated manifest excluded).
    pub files: usize,
    /// Whether a `pack.mcmeta` was generated.
    pub manifest: bool,
}

/// Default artifact name: `"{name} {packver} ({version label})"`.
pub fn default_output_name(config: &Config, version_label: &str) -> String {
    format!("{} {} ({version_label})", config.name, config.pack_version)
}

/// Packaging engine bound to one project root.
pub struct Packer {
    root: PathBuf,
    reporter: Arc<dyn Reporter>,
    formats: Arc<dyn FormatTable>,
}

impl std::fmt::Debug for Packer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packer")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Packer {
    /// Create a packer for the project rooted at `root`, using the built-in
    /// format table.
    pub fn new(root: impl Into<PathBuf>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            root: root.into(),
            reporter,
            formats: Arc::new(BuiltinFormatTable),
        }
    }

    /// Replace the format table.
    pub fn with_format_table(mut self, formats: Arc<dyn FormatTable>) -> Self {
        self.formats = formats;
        self
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration store for the project root.
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.root.clone(), Arc::clone(&self.reporter))
    }

    /// Write the default configuration; see [`ConfigStore::init`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be written.
    pub async fn init(&self, force: bool) -> Result<InitOutcome, ConfigError> {
        self.store().init(force).await
    }

    /// Package `input` (relative to the root, `.` for the root itself) into
    /// `output`, or into the default name when `output` is `None`.
    ///
    /// Copy and archive failures are reported and returned as an
    /// unsuccessful [`PackReport`].
    ///
    /// # Errors
    ///
    /// Aborts on a malformed configuration, a malformed language entry, an
    /// invalid selector, or when the manifest cannot be written.
    pub async fn pack(
        &self,
        input: &str,
        output: Option<&str>,
        options: PackOptions,
    ) -> Result<PackReport, PackError> {
        let config = self.store().load().await?;

        let label = version_label(&config.target_version, config.snapshot_label.as_deref());
        let output = output
            .filter(|o| !o.is_empty())
            .map_or_else(|| default_output_name(&config, &label), ToString::to_string);
        let mode = if options.zipped {
            ArchiveMode::Zip
        } else {
            ArchiveMode::Folder
        };

        let manifest = build_manifest(&config, &label, self.formats.as_ref())?;
        let selectors = localize(&config.selectors(), input);

        info!(input, output = %output, ?mode, label = %label, "packaging");
        self.reporter.info(&format!(
            "Packaging version {} of '{}'...",
            config.pack_version, config.name
        ));

        let builder = ArchiveBuilder::new(&self.root, input, &output, mode, self.reporter.as_ref());
        let artifact = builder.artifact_path();
        let outcome = builder.build(&selectors, manifest.as_ref()).await?;

        let display = display_output(&output, mode);
        self.reporter.summary(
            outcome.success,
            &format!(
                "{} packaged version {} of '{}' for Minecraft {} to '{display}'",
                if outcome.success { "Successfully" } else { "Unsuccessfully" },
                config.pack_version,
                config.name,
                config.target_version,
            ),
        );

        Ok(PackReport {
            success: outcome.success,
            artifact,
            display,
            version_label: label,
            files: outcome.files,
            manifest: manifest.is_some(),
        })
    }
}
