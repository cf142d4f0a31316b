//! Per-call parameter types for VM manager operations.
//!
//! Every spec is built by the caller, used for one call and dropped.
//! Nothing here is cached between calls.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Parameters for `multipass launch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Name of the new instance, unique per build.
    pub instance_name: String,
    /// Image reference, e.g. `"18.04"`.
    pub image: String,
    /// Image remote, e.g. `"daily"`. Rewrites the image to `"<remote>:<image>"`.
    pub remote: Option<String>,
    /// Number of vCPUs, e.g. `"2"`.
    pub cpus: Option<String>,
    /// Memory size, e.g. `"2G"`.
    pub memory: Option<String>,
    /// Disk size, e.g. `"8G"`.
    pub disk: Option<String>,
}

impl LaunchSpec {
    #[must_use]
    pub fn new(instance_name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            image: image.into(),
            remote: None,
            cpus: None,
            memory: None,
            disk: None,
        }
    }

    #[must_use]
    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }

    #[must_use]
    pub fn cpus(mut self, cpus: impl Into<String>) -> Self {
        self.cpus = Some(cpus.into());
        self
    }

    #[must_use]
    pub fn memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = Some(memory.into());
        self
    }

    #[must_use]
    pub fn disk(mut self, disk: impl Into<String>) -> Self {
        self.disk = Some(disk.into());
        self
    }

    /// The image argument as passed to the VM manager.
    #[must_use]
    pub fn image_ref(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{remote}:{}", self.image),
            None => self.image.clone(),
        }
    }
}

/// One host-to-guest id translation, rendered as `"<host>:<guest>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdMapping {
    pub host: u32,
    pub guest: u32,
}

impl IdMapping {
    #[must_use]
    pub const fn new(host: u32, guest: u32) -> Self {
        Self { host, guest }
    }
}

impl fmt::Display for IdMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.guest)
    }
}

impl FromStr for IdMapping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidIdMapping(s.to_string());
        let (host, guest) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            host: host.trim().parse().map_err(|_| invalid())?,
            guest: guest.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Parameters for `multipass mount`.
///
/// Map order is significant: it is preserved into the repeated
/// `--uid-map`/`--gid-map` flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    /// Host directory to mount.
    pub source: String,
    /// Mount target, `"<instance>:<path>"` or a bare `"<instance>"`.
    pub target: String,
    pub uid_map: Vec<IdMapping>,
    pub gid_map: Vec<IdMapping>,
}

impl MountSpec {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            uid_map: Vec::new(),
            gid_map: Vec::new(),
        }
    }

    #[must_use]
    pub fn uid_map(mut self, map: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.uid_map = map.into_iter().map(|(h, g)| IdMapping::new(h, g)).collect();
        self
    }

    #[must_use]
    pub fn gid_map(mut self, map: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.gid_map = map.into_iter().map(|(h, g)| IdMapping::new(h, g)).collect();
        self
    }

    /// Instance part of the target: `<instance>:<path>` or a bare `<instance>`.
    #[must_use]
    pub fn instance_name(&self) -> Option<&str> {
        instance_of(&self.target).or_else(|| {
            let bare = !self.target.is_empty() && !self.target.contains(['/', '\\', ':']);
            bare.then_some(self.target.as_str())
        })
    }
}

/// Parameters for `multipass stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSpec {
    pub instance_name: String,
    /// Grace period in seconds before the instance is forced down.
    pub time: Option<u32>,
}

impl StopSpec {
    #[must_use]
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            time: None,
        }
    }

    #[must_use]
    pub fn time(mut self, seconds: u32) -> Self {
        self.time = Some(seconds);
        self
    }
}

/// Parameters for `multipass delete`. Purges by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSpec {
    pub instance_name: String,
    pub purge: bool,
}

impl DeleteSpec {
    #[must_use]
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            purge: true,
        }
    }

    #[must_use]
    pub fn purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }
}

/// Parameters for `multipass info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSpec {
    pub instance_name: String,
    /// Output format understood by the VM manager, e.g. `"json"`.
    pub format: Option<String>,
}

impl InfoSpec {
    #[must_use]
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            format: None,
        }
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Parameters for `multipass copy-files`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    pub source: String,
    pub destination: String,
}

impl CopySpec {
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Instance named by whichever side of the copy lives in the VM.
    #[must_use]
    pub fn instance_name(&self) -> Option<&str> {
        instance_of(&self.source).or_else(|| instance_of(&self.destination))
    }
}

/// Parameters for `multipass exec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecSpec {
    pub instance_name: String,
    pub command: Vec<String>,
}

impl ExecSpec {
    #[must_use]
    pub fn new<I, S>(instance_name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instance_name: instance_name.into(),
            command: command.into_iter().map(Into::into).collect(),
        }
    }
}

/// Extract `<instance>` from `"<instance>:<path>"`.
///
/// Anything else is a host path, including relative ones like `dist/out.snap`.
fn instance_of(reference: &str) -> Option<&str> {
    let (name, _) = reference.split_once(':')?;
    (!name.is_empty() && !name.contains(['/', '\\'])).then_some(name)
}
