//! Domain types and validators for buildvm configuration.
//!
//! Pure functions only. No I/O and no async.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider.executable",
    "provider.command_timeout_secs",
    "readiness.interval_secs",
    "readiness.timeout_secs",
    "install.snap_channel",
    "install.classic",
];

/// Default name of the VM manager executable.
pub const DEFAULT_EXECUTABLE: &str = "multipass";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.buildvm/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BuildvmConfig {
    pub provider: ProviderConfig,
    pub readiness: ReadinessConfig,
    pub install: InstallConfig,
}

/// How the VM manager is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Executable name looked up on PATH.
    pub executable: String,
    /// Upper bound for captured runs (`info`, `version`).
    pub command_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            command_timeout_secs: 30,
        }
    }
}

/// Bounds for the post-install readiness poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadinessConfig {
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            timeout_secs: 120,
        }
    }
}

/// How the VM manager is installed on Linux.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallConfig {
    pub snap_channel: String,
    /// Pass `--classic` to `snap install`.
    pub classic: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            snap_channel: "latest/stable".to_string(),
            classic: false,
        }
    }
}

// ── Readiness policy ─────────────────────────────────────────────────────────

/// Fixed-interval, time-bounded retry policy for the readiness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl ReadinessPolicy {
    /// Number of probes the policy allows: one up front, then one per
    /// interval that fits in the timeout.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let extra = self.timeout.as_millis() / self.interval.as_millis();
        u32::try_from(extra).unwrap_or(u32::MAX).saturating_add(1)
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        ReadinessConfig::default().policy()
    }
}

impl ReadinessConfig {
    #[must_use]
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            interval: Duration::from_secs(self.interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn invalid(key: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value, "a positive number of seconds").into()),
    }
}

impl BuildvmConfig {
    /// Read a setting by dotted key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown.
    pub fn get(&self, key: &str) -> Result<String> {
        validate_config_key(key)?;
        Ok(match key {
            "provider.executable" => self.provider.executable.clone(),
            "provider.command_timeout_secs" => self.provider.command_timeout_secs.to_string(),
            "readiness.interval_secs" => self.readiness.interval_secs.to_string(),
            "readiness.timeout_secs" => self.readiness.timeout_secs.to_string(),
            "install.snap_channel" => self.install.snap_channel.clone(),
            _ => self.install.classic.to_string(),
        })
    }

    /// Update a setting by dotted key after validating the value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        match key {
            "provider.executable" => {
                if value.trim().is_empty() || value.contains(char::is_whitespace) {
                    return Err(invalid(key, value, "an executable name without spaces").into());
                }
                self.provider.executable = value.to_string();
            }
            "provider.command_timeout_secs" => {
                self.provider.command_timeout_secs = parse_positive(key, value)?;
            }
            "readiness.interval_secs" => {
                self.readiness.interval_secs = parse_positive(key, value)?;
            }
            "readiness.timeout_secs" => {
                self.readiness.timeout_secs = parse_positive(key, value)?;
            }
            "install.snap_channel" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, value, "a snap channel, e.g. latest/stable").into());
                }
                self.install.snap_channel = value.to_string();
            }
            _ => {
                self.install.classic = value
                    .parse()
                    .map_err(|_| invalid(key, value, "true or false"))?;
            }
        }
        Ok(())
    }

    /// Check every setting against the rules [`Self::set`] enforces.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, e.g. a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let mut scratch = self.clone();
        for key in VALID_CONFIG_KEYS {
            scratch.set(key, &self.get(key)?)?;
        }
        Ok(())
    }

    /// Command timeout for captured runs.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.command_timeout_secs)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
