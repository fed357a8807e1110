//! Terminal output.
//!
//! Every line the CLI prints goes through [`Output`], which also serves as
//! the engine's [`rpkr_core::Reporter`].

mod output;

pub use output::Output;
