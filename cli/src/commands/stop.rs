//! `buildvm stop`: stop a running instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::InstanceLifecycle;
use crate::domain::StopSpec;

/// Arguments for the stop command.
#[derive(Args)]
pub struct StopArgs {
    /// Instance to stop
    pub name: String,

    /// Seconds to wait before forcing the instance down
    #[arg(long)]
    pub time: Option<u32>,
}

/// Run `buildvm stop`.
///
/// # Errors
///
/// Returns an error if the instance cannot be stopped.
pub async fn run(
    app: &AppContext,
    args: &StopArgs,
    provider: &impl InstanceLifecycle,
) -> Result<ExitCode> {
    let mut spec = StopSpec::new(&args.name);
    spec.time = args.time;
    provider.stop(&spec).await?;
    app.output.success(&format!("Instance {} stopped", args.name));
    Ok(ExitCode::SUCCESS)
}
