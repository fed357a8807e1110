//! Shared types and on-disk formats for rpkr.
//!
//! `config` describes the persisted `.rpkr.json` project file, `manifest`
//! the generated `pack.mcmeta` written into every artifact.

pub mod config;
pub mod json;
pub mod manifest;

// Re-exports
pub use config::*;
pub use manifest::*;
