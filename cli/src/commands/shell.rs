//! `buildvm shell`: interactive shell in an instance.

use std::process::ExitCode;

use anyhow::Result;

use crate::application::ports::ShellExecutor;

/// Run `buildvm shell <name>`.
///
/// # Errors
///
/// Returns an error if the shell session exits non-zero.
pub async fn run(name: &str, provider: &impl ShellExecutor) -> Result<ExitCode> {
    provider.shell(name).await?;
    Ok(ExitCode::SUCCESS)
}
