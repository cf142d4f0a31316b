//! `buildvm exec`: run a command inside an instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::application::ports::ShellExecutor;
use crate::domain::{ExecSpec, ProviderError};

/// Arguments for the exec command.
#[derive(Args)]
pub struct ExecArgs {
    /// Instance to run in
    pub name: String,

    /// Command and arguments to run in the instance
    #[arg(required = true, last = true)]
    pub command: Vec<String>,
}

/// Run a command inside an instance.
///
/// A command that runs and exits non-zero passes its exit code through
/// instead of reporting an error.
///
/// # Errors
///
/// Returns an error if the command could not be run at all.
pub async fn run(args: &ExecArgs, provider: &impl ShellExecutor) -> Result<ExitCode> {
    let spec = ExecSpec::new(&args.name, args.command.iter().cloned());
    match provider.exec(&spec).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err @ ProviderError::Exec { .. }) => match err.exit_code() {
            Some(code) => Ok(ExitCode::from(u8::try_from(code).unwrap_or(1))),
            None => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}
