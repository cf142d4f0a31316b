//! `buildvm copy-files`: copy files between the host and an instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::FileTransfer;
use crate::domain::CopySpec;

/// Arguments for the copy-files command.
#[derive(Args)]
pub struct CopyFilesArgs {
    /// Source path; prefix with <instance>: for a path inside an instance
    pub source: String,

    /// Destination path; prefix with <instance>: for a path inside an instance
    pub destination: String,
}

/// Run `buildvm copy-files`.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub async fn run(
    app: &AppContext,
    args: &CopyFilesArgs,
    provider: &impl FileTransfer,
) -> Result<ExitCode> {
    provider
        .copy_files(&CopySpec::new(&args.source, &args.destination))
        .await?;
    app.output
        .success(&format!("Copied {} to {}", args.source, args.destination));
    Ok(ExitCode::SUCCESS)
}
