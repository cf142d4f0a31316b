//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::fmt;

use thiserror::Error;

// ── Command failures ──────────────────────────────────────────────────────────

/// `program` followed by `args`, as recorded in a [`CommandFailure`].
#[must_use]
pub fn command_line(program: &str, args: &[String]) -> Vec<String> {
    std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect()
}

/// How a VM manager invocation failed.
///
/// `exit_code` is `None` when the process was killed by a signal or could
/// not be spawned at all; `detail` then says which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Full command line, program first.
    pub command: Vec<String>,
    pub exit_code: Option<i32>,
    pub detail: Option<String>,
}

impl CommandFailure {
    /// The command ran and exited with `exit_code` (`None` for a signal).
    #[must_use]
    pub fn exited(command: Vec<String>, exit_code: Option<i32>) -> Self {
        Self {
            command,
            exit_code,
            detail: None,
        }
    }

    /// The command never produced an exit status.
    #[must_use]
    pub fn not_run(command: Vec<String>, detail: impl Into<String>) -> Self {
        Self {
            command,
            exit_code: None,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = self.command.join(" ");
        match (self.exit_code, &self.detail) {
            (Some(code), _) => write!(f, "`{cmd}` exited with status {code}"),
            (None, Some(detail)) => write!(f, "`{cmd}` could not be run: {detail}"),
            (None, None) => write!(f, "`{cmd}` was terminated by a signal"),
        }
    }
}

// ── Provider errors ───────────────────────────────────────────────────────────

/// Errors raised while bootstrapping or driving the VM manager.
///
/// One variant per operation so callers can branch on what failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{tool} is not installed or not on PATH")]
    ToolNotFound {
        tool: String,
        /// Whether an automatic install can be offered on this host.
        prompt_installable: bool,
    },

    #[error("{platform} is not a supported platform for installing {tool}")]
    UnsupportedPlatform { tool: String, platform: String },

    #[error("failed to install {tool}: {failure}")]
    InstallFailed { tool: String, failure: CommandFailure },

    #[error("{tool} did not become ready after {attempts} attempts ({waited_secs}s)")]
    ReadinessTimeout {
        tool: String,
        attempts: u32,
        waited_secs: u64,
    },

    #[error("failed to launch instance '{instance}': {failure}")]
    Launch {
        instance: String,
        failure: CommandFailure,
    },

    #[error("failed to open a shell in instance '{instance}': {failure}")]
    Shell {
        instance: String,
        failure: CommandFailure,
    },

    #[error("failed to stop instance '{instance}': {failure}")]
    Stop {
        instance: String,
        failure: CommandFailure,
    },

    #[error("failed to delete instance '{instance}': {failure}")]
    Delete {
        instance: String,
        failure: CommandFailure,
    },

    #[error("failed to mount '{source_path}' on '{target}': {failure}")]
    Mount {
        source_path: String,
        target: String,
        instance: Option<String>,
        failure: CommandFailure,
    },

    #[error("failed to copy '{source_path}' to '{destination}': {failure}")]
    FileCopy {
        source_path: String,
        destination: String,
        instance: Option<String>,
        failure: CommandFailure,
    },

    #[error("failed to run a command in instance '{instance}': {failure}")]
    Exec {
        instance: String,
        failure: CommandFailure,
    },

    #[error("failed to query info for instance '{instance}': {failure}")]
    Info {
        instance: String,
        failure: CommandFailure,
    },
}

impl ProviderError {
    /// The instance the failed operation targeted, where there is one.
    #[must_use]
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            Self::Launch { instance, .. }
            | Self::Shell { instance, .. }
            | Self::Stop { instance, .. }
            | Self::Delete { instance, .. }
            | Self::Exec { instance, .. }
            | Self::Info { instance, .. } => Some(instance),
            Self::Mount { instance, .. } | Self::FileCopy { instance, .. } => instance.as_deref(),
            _ => None,
        }
    }

    /// The underlying command failure, for errors raised by a process run.
    #[must_use]
    pub fn failure(&self) -> Option<&CommandFailure> {
        match self {
            Self::InstallFailed { failure, .. }
            | Self::Launch { failure, .. }
            | Self::Shell { failure, .. }
            | Self::Stop { failure, .. }
            | Self::Delete { failure, .. }
            | Self::Mount { failure, .. }
            | Self::FileCopy { failure, .. }
            | Self::Exec { failure, .. }
            | Self::Info { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Exit code of the failed process, if it exited normally.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        self.failure().and_then(|f| f.exit_code)
    }

    /// Command line of the failed process, program first.
    #[must_use]
    pub fn command_line(&self) -> Option<&[String]> {
        self.failure().map(|f| f.command.as_slice())
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Invalid id mapping '{0}': expected <host-id>:<guest-id>")]
    InvalidIdMapping(String),
}
