//! buildvm CLI - ephemeral multipass VMs for package builds

use std::process::ExitCode;

use buildvm::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `buildvm=debug`.
const LOG_ENV: &str = "BUILDVM_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
