//! rpkr - resource pack packager
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Command-line shell over `rpkr-core`. Every command resolves paths against
//! the current working directory, which is treated as the project root.
//!
//! # Commands
//!
//! ```text
//! rpkr init [--force]                      write .rpkr.json with defaults
//! rpkr pack [INPUT] [OUTPUT] [--zip|--folder]
//! rpkr version
//! ```

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rpkr")]
#[command(version, about = "The simple way to package Minecraft resource packs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise this directory with an .rpkr.json configuration file
    Init {
        /// Overwrite an existing .rpkr.json with default settings
        #[arg(long, short = 'f')]
        force: bool,
        /// Older spelling of `--force` (`rpkr init force`)
        #[arg(hide = true, value_name = "FORCE")]
        legacy_force: Option<String>,
    },
    /// Package the resource pack into a zip file or a folder
    ///
    /// With a single path it names the output. An output ending in `.zip`
    /// produces a zip; any other explicit output produces a folder. Without
    /// an output the pack is zipped under a name built from the
    /// configuration.
    Pack {
        /// [INPUT] [OUTPUT]
        #[arg(value_name = "PATH", num_args = 0..=2)]
        paths: Vec<String>,
        /// Always produce a zip file
        #[arg(long, short = 'z', conflicts_with = "folder")]
        zip: bool,
        /// Always produce a folder
        #[arg(long)]
        folder: bool,
    },
    /// Display the current version of resourcepacker
    Version,
}
