//! Argument vectors for every VM manager verb.
//!
//! Pure functions from parameter structs to argv, without the program name.
//! Flag order is part of the contract with the VM manager and must not be
//! rearranged.

use crate::domain::config::InstallConfig;
use crate::domain::platform::Platform;
use crate::domain::spec::{
    CopySpec, DeleteSpec, ExecSpec, InfoSpec, LaunchSpec, MountSpec, StopSpec,
};

/// `launch <image> --name <name> [--cpus N] [--mem M] [--disk D]`
#[must_use]
pub fn launch(spec: &LaunchSpec) -> Vec<String> {
    let mut args = vec![
        "launch".to_string(),
        spec.image_ref(),
        "--name".to_string(),
        spec.instance_name.clone(),
    ];
    let optional = [
        ("--cpus", &spec.cpus),
        ("--mem", &spec.memory),
        ("--disk", &spec.disk),
    ];
    for (flag, value) in optional {
        if let Some(value) = value {
            args.push(flag.to_string());
            args.push(value.clone());
        }
    }
    args
}

/// `shell <name>`
#[must_use]
pub fn shell(instance_name: &str) -> Vec<String> {
    vec!["shell".to_string(), instance_name.to_string()]
}

/// `stop [--time T] <name>`; the time flag goes right after the verb.
#[must_use]
pub fn stop(spec: &StopSpec) -> Vec<String> {
    let mut args = vec!["stop".to_string()];
    if let Some(time) = spec.time {
        args.push("--time".to_string());
        args.push(time.to_string());
    }
    args.push(spec.instance_name.clone());
    args
}

/// `delete <name> [--purge]`
#[must_use]
pub fn delete(spec: &DeleteSpec) -> Vec<String> {
    let mut args = vec!["delete".to_string(), spec.instance_name.clone()];
    if spec.purge {
        args.push("--purge".to_string());
    }
    args
}

/// `mount <source> <target> [--uid-map h:g]... [--gid-map h:g]...`
///
/// All uid mappings are emitted before any gid mapping.
#[must_use]
pub fn mount(spec: &MountSpec) -> Vec<String> {
    let mut args = vec![
        "mount".to_string(),
        spec.source.clone(),
        spec.target.clone(),
    ];
    for mapping in &spec.uid_map {
        args.push("--uid-map".to_string());
        args.push(mapping.to_string());
    }
    for mapping in &spec.gid_map {
        args.push("--gid-map".to_string());
        args.push(mapping.to_string());
    }
    args
}

/// `copy-files <source> <destination>`
#[must_use]
pub fn copy_files(spec: &CopySpec) -> Vec<String> {
    vec![
        "copy-files".to_string(),
        spec.source.clone(),
        spec.destination.clone(),
    ]
}

/// `info <name> [--format F]`
#[must_use]
pub fn info(spec: &InfoSpec) -> Vec<String> {
    let mut args = vec!["info".to_string(), spec.instance_name.clone()];
    if let Some(format) = &spec.format {
        args.push("--format".to_string());
        args.push(format.clone());
    }
    args
}

/// `exec <name> -- <command>...`
#[must_use]
pub fn exec(spec: &ExecSpec) -> Vec<String> {
    let mut args = vec![
        "exec".to_string(),
        spec.instance_name.clone(),
        "--".to_string(),
    ];
    args.extend(spec.command.iter().cloned());
    args
}

/// `version`, the readiness probe.
#[must_use]
pub fn version() -> Vec<String> {
    vec!["version".to_string()]
}

/// Install command (program, args) for `package` on `platform`.
///
/// Linux goes through `snap`, macOS through Homebrew casks. Any other
/// platform has no install path and yields `None`.
#[must_use]
pub fn install(
    platform: &Platform,
    package: &str,
    config: &InstallConfig,
) -> Option<(&'static str, Vec<String>)> {
    match platform {
        Platform::Linux => {
            let mut args = vec![
                "snap".to_string(),
                "install".to_string(),
                package.to_string(),
                "--channel".to_string(),
                config.snap_channel.clone(),
            ];
            if config.classic {
                args.push("--classic".to_string());
            }
            Some(("sudo", args))
        }
        Platform::Darwin => Some((
            "brew",
            vec![
                "install".to_string(),
                "--cask".to_string(),
                package.to_string(),
            ],
        )),
        Platform::Other(_) => None,
    }
}
