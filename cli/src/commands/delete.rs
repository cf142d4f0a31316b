//! `buildvm delete`: remove an instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::InstanceLifecycle;
use crate::domain::DeleteSpec;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Instance to delete
    pub name: String,

    /// Keep the instance recoverable instead of purging it
    #[arg(long)]
    pub no_purge: bool,
}

/// Run `buildvm delete`.
///
/// # Errors
///
/// Returns an error if the instance cannot be deleted.
pub async fn run(
    app: &AppContext,
    args: &DeleteArgs,
    provider: &impl InstanceLifecycle,
) -> Result<ExitCode> {
    let spec = DeleteSpec::new(&args.name).purge(!args.no_purge);
    provider.delete(&spec).await?;
    app.output.success(&format!("Instance {} deleted", args.name));
    Ok(ExitCode::SUCCESS)
}
