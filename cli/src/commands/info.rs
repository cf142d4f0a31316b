//! `buildvm info`: print what multipass reports about an instance.

use std::io::Write as _;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::InstanceInspector;
use crate::domain::InfoSpec;

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {
    /// Instance to inspect
    pub name: String,

    /// Output format understood by multipass (table, json, csv, yaml)
    #[arg(long)]
    pub format: Option<String>,
}

/// Run `buildvm info`. The captured output is written to stdout unchanged.
///
/// # Errors
///
/// Returns an error if multipass reports a failure.
pub async fn run(args: &InfoArgs, provider: &impl InstanceInspector) -> Result<ExitCode> {
    let mut spec = InfoSpec::new(&args.name);
    spec.format.clone_from(&args.format);
    let output = provider.info(&spec).await?;
    std::io::stdout()
        .write_all(&output.stdout)
        .context("cannot write info output")?;
    Ok(ExitCode::SUCCESS)
}
