//! rpkr - resource pack packager CLI

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rpkr_cli::cmd;
use rpkr_cli::ui::Output;
use rpkr_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => {
            cmd::welcome();
            Ok(())
        }
        Some(Commands::Init {
            force,
            legacy_force,
        }) => cmd::init::init(cmd::init::wants_force(force, legacy_force.as_deref())).await,
        Some(Commands::Pack { paths, zip, folder }) => cmd::pack::pack(&paths, zip, folder).await,
        Some(Commands::Version) => {
            cmd::version::version();
            Ok(())
        }
    }
}
