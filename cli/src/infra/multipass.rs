//! Infrastructure implementation of the VM port traits on top of multipass.
//!
//! `MultipassProvider<R>` builds every argument vector through
//! [`crate::domain::args`] and routes it through a `CommandRunner`:
//!
//! | operation                                     | runner mode   |
//! |-----------------------------------------------|---------------|
//! | launch, stop, delete, mount, copy-files, exec | detached      |
//! | shell                                         | interactive   |
//! | info                                          | captured      |
//!
//! Captured runs never fail on a non-zero exit by themselves, so `info`
//! inspects the status explicitly.

use std::process::{ExitStatus, Output};

use crate::application::ports::{
    CommandRunner, FileTransfer, InstanceInspector, InstanceLifecycle, PROVIDER_NAME,
    ShellExecutor,
};
use crate::domain::args;
use crate::domain::error::{CommandFailure, command_line};
use crate::domain::{
    CopySpec, DeleteSpec, ExecSpec, InfoSpec, LaunchSpec, MountSpec, ProviderError, StopSpec,
};

/// Infrastructure adapter that drives the multipass CLI through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a recording
/// runner without spawning real processes.
pub struct MultipassProvider<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> MultipassProvider<R> {
    /// Provider invoking the default `multipass` executable.
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, PROVIDER_NAME)
    }

    /// Provider invoking `program` instead of `multipass`.
    pub fn with_program(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn detached(&self, args: Vec<String>) -> Result<(), CommandFailure> {
        let result = self.runner.run_detached(&self.program, &args).await;
        self.check(args, result)
    }

    async fn interactive(&self, args: Vec<String>) -> Result<(), CommandFailure> {
        let result = self.runner.run_interactive(&self.program, &args).await;
        self.check(args, result)
    }

    async fn captured(&self, args: Vec<String>) -> Result<Output, CommandFailure> {
        match self.runner.run_captured(&self.program, &args).await {
            Ok(output) => {
                self.check(args, Ok(output.status))?;
                Ok(output)
            }
            Err(e) => Err(self.not_run(args, &e)),
        }
    }

    fn check(
        &self,
        args: Vec<String>,
        result: anyhow::Result<ExitStatus>,
    ) -> Result<(), CommandFailure> {
        match result {
            Ok(status) if status.success() => {
                tracing::debug!(program = %self.program, ?args, "command succeeded");
                Ok(())
            }
            Ok(status) => {
                tracing::warn!(program = %self.program, ?args, code = ?status.code(), "command failed");
                Err(CommandFailure::exited(
                    command_line(&self.program, &args),
                    status.code(),
                ))
            }
            Err(e) => Err(self.not_run(args, &e)),
        }
    }

    fn not_run(&self, args: Vec<String>, error: &anyhow::Error) -> CommandFailure {
        tracing::warn!(program = %self.program, ?args, "command could not be run: {error:#}");
        CommandFailure::not_run(command_line(&self.program, &args), format!("{error:#}"))
    }
}

impl<R: CommandRunner> InstanceLifecycle for MultipassProvider<R> {
    async fn launch(&self, spec: &LaunchSpec) -> Result<(), ProviderError> {
        self.detached(args::launch(spec))
            .await
            .map_err(|failure| ProviderError::Launch {
                instance: spec.instance_name.clone(),
                failure,
            })
    }

    async fn stop(&self, spec: &StopSpec) -> Result<(), ProviderError> {
        self.detached(args::stop(spec))
            .await
            .map_err(|failure| ProviderError::Stop {
                instance: spec.instance_name.clone(),
                failure,
            })
    }

    async fn delete(&self, spec: &DeleteSpec) -> Result<(), ProviderError> {
        self.detached(args::delete(spec))
            .await
            .map_err(|failure| ProviderError::Delete {
                instance: spec.instance_name.clone(),
                failure,
            })
    }
}

impl<R: CommandRunner> ShellExecutor for MultipassProvider<R> {
    async fn shell(&self, instance_name: &str) -> Result<(), ProviderError> {
        self.interactive(args::shell(instance_name))
            .await
            .map_err(|failure| ProviderError::Shell {
                instance: instance_name.to_string(),
                failure,
            })
    }

    async fn exec(&self, spec: &ExecSpec) -> Result<(), ProviderError> {
        self.detached(args::exec(spec))
            .await
            .map_err(|failure| ProviderError::Exec {
                instance: spec.instance_name.clone(),
                failure,
            })
    }
}

impl<R: CommandRunner> FileTransfer for MultipassProvider<R> {
    async fn mount(&self, spec: &MountSpec) -> Result<(), ProviderError> {
        self.detached(args::mount(spec))
            .await
            .map_err(|failure| ProviderError::Mount {
                source_path: spec.source.clone(),
                target: spec.target.clone(),
                instance: spec.instance_name().map(str::to_string),
                failure,
            })
    }

    async fn copy_files(&self, spec: &CopySpec) -> Result<(), ProviderError> {
        self.detached(args::copy_files(spec))
            .await
            .map_err(|failure| ProviderError::FileCopy {
                source_path: spec.source.clone(),
                destination: spec.destination.clone(),
                instance: spec.instance_name().map(str::to_string),
                failure,
            })
    }
}

impl<R: CommandRunner> InstanceInspector for MultipassProvider<R> {
    async fn info(&self, spec: &InfoSpec) -> Result<Output, ProviderError> {
        self.captured(args::info(spec))
            .await
            .map_err(|failure| ProviderError::Info {
                instance: spec.instance_name.clone(),
                failure,
            })
    }
}
