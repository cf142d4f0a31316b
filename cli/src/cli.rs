//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Ephemeral multipass build VMs
#[derive(Parser)]
#[command(
    name = "buildvm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Answer yes to prompts (install multipass without asking)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install multipass if needed and wait until it answers
    Setup,

    /// Create and start an instance
    Launch(commands::launch::LaunchArgs),

    /// Open an interactive shell in an instance
    Shell {
        /// Instance name
        name: String,
    },

    /// Stop an instance
    Stop(commands::stop::StopArgs),

    /// Delete an instance
    Delete(commands::delete::DeleteArgs),

    /// Mount a host directory into an instance
    Mount(commands::mount::MountArgs),

    /// Copy files between the host and an instance
    #[command(name = "copy-files")]
    CopyFiles(commands::copy_files::CopyFilesArgs),

    /// Run a command inside an instance
    Exec(commands::exec::ExecArgs),

    /// Show instance information
    Info(commands::info::InfoArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags { no_color, quiet },
            yes,
        })?;

        match command {
            Command::Setup => commands::setup::run(&app).await,
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Launch(args) => {
                commands::launch::run(&app, &args, &app.provider().await?).await
            }
            Command::Shell { name } => commands::shell::run(&name, &app.provider().await?).await,
            Command::Stop(args) => commands::stop::run(&app, &args, &app.provider().await?).await,
            Command::Delete(args) => {
                commands::delete::run(&app, &args, &app.provider().await?).await
            }
            Command::Mount(args) => {
                commands::mount::run(&app, &args, &app.provider().await?).await
            }
            Command::CopyFiles(args) => {
                commands::copy_files::run(&app, &args, &app.provider().await?).await
            }
            Command::Exec(args) => commands::exec::run(&args, &app.provider().await?).await,
            Command::Info(args) => commands::info::run(&args, &app.provider().await?).await,
        }
    }
}
