//! `buildvm mount`: bind-mount a host directory into an instance.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::FileTransfer;
use crate::domain::{IdMapping, MountSpec};

/// Arguments for the mount command.
#[derive(Args)]
pub struct MountArgs {
    /// Host directory to mount
    pub source: String,

    /// Mount point, as <instance>:<path>
    pub target: String,

    /// Map a host uid to a guest uid (repeatable, order kept)
    #[arg(long = "uid-map", value_name = "HOST:GUEST")]
    pub uid_map: Vec<IdMapping>,

    /// Map a host gid to a guest gid (repeatable, order kept)
    #[arg(long = "gid-map", value_name = "HOST:GUEST")]
    pub gid_map: Vec<IdMapping>,
}

/// Run `buildvm mount`.
///
/// # Errors
///
/// Returns an error if the mount fails.
pub async fn run(
    app: &AppContext,
    args: &MountArgs,
    provider: &impl FileTransfer,
) -> Result<ExitCode> {
    let mut spec = MountSpec::new(&args.source, &args.target);
    spec.uid_map.clone_from(&args.uid_map);
    spec.gid_map.clone_from(&args.gid_map);
    provider.mount(&spec).await?;
    app.output
        .success(&format!("Mounted {} on {}", args.source, args.target));
    Ok(ExitCode::SUCCESS)
}
