//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod args;
pub mod config;
pub mod error;
pub mod platform;
pub mod spec;

pub use config::{BuildvmConfig, ReadinessPolicy, validate_config_key};
pub use error::{CommandFailure, ConfigError, ProviderError};
pub use platform::Platform;
pub use spec::{
    CopySpec, DeleteSpec, ExecSpec, IdMapping, InfoSpec, LaunchSpec, MountSpec, StopSpec,
};
