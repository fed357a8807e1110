//! Error types for the packaging engine.
//!
//! Only conditions that abort a run live here. Copy and archive failures are
//! reported through the [`Reporter`](crate::Reporter) and surface as an
//! unsuccessful [`PackReport`](crate::PackReport) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing `.rpkr.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be written.
    #[error("FSWriteError: Cannot write to {}: {source}", path.display())]
    Write {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but is not a valid configuration.
    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The default configuration could not be rendered.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while building the `pack.mcmeta` manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A `languages` entry does not have the `Name (Region)` shape.
    #[error("Malformed language entry for '{code}': expected \"Name (Region)\", got \"{entry}\"")]
    MalformedLanguageEntry {
        /// Language code the entry belongs to.
        code: String,
        /// The offending entry text.
        entry: String,
    },

    /// The description placeholder pattern could not be compiled.
    #[error("Failed to build description template: {0}")]
    Template(#[from] regex::Error),
}

/// Errors that abort a packaging run.
#[derive(Error, Debug)]
pub enum PackError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest could not be built.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A file selector is not a valid glob pattern.
    #[error("Invalid file selector '{selector}': {source}")]
    Selector {
        /// The localized selector that failed to compile.
        selector: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// The manifest could not be written to disk.
    #[error("FSWriteError: Could not create automatic pack.mcmeta file at {}: {source}", path.display())]
    ManifestWrite {
        /// Destination of the manifest (final or temporary).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be rendered.
    #[error("Failed to serialize pack.mcmeta: {0}")]
    Serialize(#[from] serde_json::Error),
}
