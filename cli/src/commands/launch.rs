//! `buildvm launch`: create and start a new instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::InstanceLifecycle;
use crate::domain::LaunchSpec;

/// Arguments for the launch command.
#[derive(Args)]
pub struct LaunchArgs {
    /// Name of the new instance
    pub name: String,

    /// Image to boot, e.g. 18.04
    #[arg(long)]
    pub image: String,

    /// Image remote, e.g. daily
    #[arg(long)]
    pub remote: Option<String>,

    /// Number of vCPUs
    #[arg(long)]
    pub cpus: Option<String>,

    /// Memory size, e.g. 2G
    #[arg(long)]
    pub mem: Option<String>,

    /// Disk size, e.g. 8G
    #[arg(long)]
    pub disk: Option<String>,
}

impl LaunchArgs {
    fn spec(&self) -> LaunchSpec {
        let mut spec = LaunchSpec::new(&self.name, &self.image);
        spec.remote.clone_from(&self.remote);
        spec.cpus.clone_from(&self.cpus);
        spec.memory.clone_from(&self.mem);
        spec.disk.clone_from(&self.disk);
        spec
    }
}

/// Run `buildvm launch`.
///
/// # Errors
///
/// Returns an error if the instance cannot be launched.
pub async fn run(
    app: &AppContext,
    args: &LaunchArgs,
    provider: &impl InstanceLifecycle,
) -> Result<ExitCode> {
    app.output.step(&format!("Launching {}...", args.name));
    provider.launch(&args.spec()).await?;
    app.output.success(&format!("Instance {} launched", args.name));
    Ok(ExitCode::SUCCESS)
}
