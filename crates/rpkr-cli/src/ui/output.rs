//! Prefixed single-line diagnostics.

use crossterm::style::Stylize;
use rpkr_core::Reporter;

/// Tag printed at the start of every line.
const PREFIX: &str = "<resourcepacker>";

/// Prints diagnostics to the terminal. Informational and success lines go to
/// stdout, warnings and errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    /// Create a new output handle.
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, msg: &str) {
        println!("{} {msg}", PREFIX.dark_grey());
    }

    pub fn success(&self, msg: &str) {
        println!("{} {}", PREFIX.dark_grey(), msg.green());
    }

    pub fn warning(&self, msg: &str) {
        eprintln!("{} {} {msg}", PREFIX.dark_grey(), "Warning:".yellow().bold());
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} {} {msg}", PREFIX.dark_grey(), "Error:".red().bold());
    }
}

impl Reporter for Output {
    fn info(&self, msg: &str) {
        self.info(msg);
    }

    fn success(&self, msg: &str) {
        self.success(msg);
    }

    fn warning(&self, msg: &str) {
        self.warning(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn summary(&self, success: bool, msg: &str) {
        if success {
            self.success(msg);
        } else {
            eprintln!("{} {}", PREFIX.dark_grey(), msg.red());
        }
    }
}
