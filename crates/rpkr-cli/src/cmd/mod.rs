//! Command modules - one file per CLI command

pub mod init;
pub mod pack;
pub mod version;

use crate::ui::Output;

/// Printed when `rpkr` runs without a subcommand.
pub fn welcome() {
    let output = Output::new();
    output.info("Welcome to resourcepacker, the simple way to package Minecraft resource packs.");
    output.info("Type `rpkr --help` for a list of commands.");
}
