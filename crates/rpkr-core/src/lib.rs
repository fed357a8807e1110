//! Packaging engine for rpkr.
//!
//! Turns a directory of loose resource-pack assets into a folder or zip
//! artifact, generating `pack.mcmeta` from the project's `.rpkr.json`.
//!
//! # Pipeline
//!
//! ```text
//! ConfigStore::load ─┬─ version_label ─ resolve_format ─┐
//!                    ├─ compile_description ────────────┼─ build_manifest
//!                    ├─ parse_language ─────────────────┘        │
//!                    └─ localize(selectors) ─────────── ArchiveBuilder::build
//! ```
//!
//! [`Packer`] runs the whole pipeline; the individual steps are public for
//! callers that need only part of it.

pub mod archive;
pub mod description;
pub mod error;
pub mod format;
pub mod label;
pub mod language;
pub mod meta;
pub mod pack;
pub mod paths;
pub mod reporter;
pub mod store;

pub use archive::{ArchiveBuilder, ArchiveMode};
pub use error::{ConfigError, ManifestError, PackError};
pub use format::{BuiltinFormatTable, FormatTable, resolve_format};
pub use pack::{PackOptions, PackReport, Packer};
pub use reporter::{NullReporter, Reporter};
pub use store::{ConfigStore, InitOutcome};
