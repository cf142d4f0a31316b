//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::config::BuildvmConfig;
use crate::domain::{
    CopySpec, DeleteSpec, ExecSpec, InfoSpec, LaunchSpec, MountSpec, ProviderError, StopSpec,
};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Name of the backing VM manager.
pub const PROVIDER_NAME: &str = "multipass";

// ── VM Port Traits ────────────────────────────────────────────────────────────

/// Instance lifecycle operations: create, stop, destroy.
#[allow(async_fn_in_trait)]
pub trait InstanceLifecycle {
    /// Launch a new instance.
    async fn launch(&self, spec: &LaunchSpec) -> Result<(), ProviderError>;
    /// Stop a running instance.
    async fn stop(&self, spec: &StopSpec) -> Result<(), ProviderError>;
    /// Delete an instance, purging it unless told otherwise.
    async fn delete(&self, spec: &DeleteSpec) -> Result<(), ProviderError>;
}

/// Command execution inside an instance.
#[allow(async_fn_in_trait)]
pub trait ShellExecutor {
    /// Open an interactive shell attached to the caller's terminal.
    async fn shell(&self, instance_name: &str) -> Result<(), ProviderError>;
    /// Run a command inside the instance with stdin detached.
    async fn exec(&self, spec: &ExecSpec) -> Result<(), ProviderError>;
}

/// Moving host artifacts into and out of an instance.
///
/// These two calls are the whole surface a build plugin needs.
#[allow(async_fn_in_trait)]
pub trait FileTransfer {
    /// Bind-mount a host directory into an instance.
    async fn mount(&self, spec: &MountSpec) -> Result<(), ProviderError>;
    /// Copy files between the host and an instance.
    async fn copy_files(&self, spec: &CopySpec) -> Result<(), ProviderError>;
}

/// Instance inspection.
#[allow(async_fn_in_trait)]
pub trait InstanceInspector {
    /// Query instance info. The captured output is returned untouched.
    async fn info(&self, spec: &InfoSpec) -> Result<Output, ProviderError>;
}

/// Everything a caller can do with an instance.
pub trait VmProvider: InstanceLifecycle + ShellExecutor + FileTransfer + InstanceInspector {}

/// Blanket implementation: any type implementing all four sub-traits is a `VmProvider`.
impl<T> VmProvider for T where T: InstanceLifecycle + ShellExecutor + FileTransfer + InstanceInspector
{}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Each method runs exactly one process. None of them treat a non-zero exit
/// as an error; callers inspect the status.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run with stdin on the null device and output on the caller's terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    async fn run_detached(&self, program: &str, args: &[String]) -> Result<ExitStatus>;

    /// Run with stdin, stdout and stderr inherited from the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    async fn run_interactive(&self, program: &str, args: &[String]) -> Result<ExitStatus>;

    /// Run with stdout and stderr captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. On timeout, the child process must be killed.
    async fn run_captured(&self, program: &str, args: &[String]) -> Result<Output>;
}

// ── Path Resolution Port ──────────────────────────────────────────────────────

/// Abstracts executable lookup so presence checks can be tested without
/// touching the real PATH.
pub trait PathResolver {
    /// Full path of `program` if it is on PATH.
    fn find_executable(&self, program: &str) -> Option<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration cannot be read or parsed.
    fn load(&self) -> Result<BuildvmConfig>;
    /// Persist the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &BuildvmConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
