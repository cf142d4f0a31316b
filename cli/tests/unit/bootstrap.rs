//! Tests for locating, installing and waiting on the VM manager.

#![allow(clippy::expect_used)]

use std::time::Duration;

use buildvm::application::services::{installer, locator};
use buildvm::domain::config::InstallConfig;
use buildvm::domain::{BuildvmConfig, Platform, ProviderError, ReadinessPolicy};

use crate::mocks::{CollectingReporter, MockCommandRunner, MockResolver, Via};

const VERSION_OUTPUT: &[u8] = b"multipass   1.13.0\nmultipassd  1.13.0\n";

fn policy(interval_secs: u64, timeout_secs: u64) -> ReadinessPolicy {
    ReadinessPolicy {
        interval: Duration::from_secs(interval_secs),
        timeout: Duration::from_secs(timeout_secs),
    }
}

#[test]
fn install_prompt_matrix() {
    let cases = [
        ("linux", true, true),
        ("linux", false, false),
        ("darwin", true, true),
        ("darwin", false, true),
        ("windows", true, false),
        ("freebsd", false, false),
    ];
    for (platform, snap, expected) in cases {
        let resolver = if snap {
            MockResolver::with(&["snap"])
        } else {
            MockResolver::default()
        };
        let err = locator::ensure_present(&resolver, "multipass", &Platform::parse(platform))
            .expect_err("multipass is absent");
        let ProviderError::ToolNotFound {
            prompt_installable, ..
        } = err
        else {
            panic!("{platform}: expected ToolNotFound, got {err:?}");
        };
        assert_eq!(prompt_installable, expected, "{platform} snap={snap}");
    }
}

#[tokio::test(start_paused = true)]
async fn linux_install_uses_snap_then_polls_version_once_ready() {
    let runner = MockCommandRunner::ok()
        .with_stdout(VERSION_OUTPUT)
        .then(&[0, 1, 1, 0]);
    let reporter = CollectingReporter::default();

    installer::install(
        &runner,
        &reporter,
        &Platform::Linux,
        "multipass",
        &InstallConfig::default(),
        policy(2, 120),
    )
    .await
    .expect("install");

    let calls = runner.calls();
    assert_eq!(calls[0].0, Via::Interactive);
    assert_eq!(
        runner.argvs()[0],
        ["sudo", "snap", "install", "multipass", "--channel", "latest/stable"]
    );
    let probes: Vec<_> = calls[1..].iter().map(|(via, p, a)| (*via, p.as_str(), a.clone())).collect();
    assert_eq!(probes.len(), 3);
    for (via, program, args) in probes {
        assert_eq!(via, Via::Captured);
        assert_eq!(program, "multipass");
        assert_eq!(args, ["version"]);
    }
    assert_eq!(reporter.messages(), ["Waiting for multipass..."]);
}

#[tokio::test(start_paused = true)]
async fn darwin_install_uses_brew_cask() {
    let runner = MockCommandRunner::ok().with_stdout(VERSION_OUTPUT);
    let reporter = CollectingReporter::default();

    installer::install(
        &runner,
        &reporter,
        &Platform::Darwin,
        "multipass",
        &InstallConfig::default(),
        policy(2, 120),
    )
    .await
    .expect("install");

    assert_eq!(runner.argvs()[0], ["brew", "install", "--cask", "multipass"]);
    assert_eq!(reporter.messages().len(), 1);
}

#[tokio::test]
async fn unsupported_platform_fails_without_side_effects() {
    let runner = MockCommandRunner::ok();
    let reporter = CollectingReporter::default();

    let err = installer::install(
        &runner,
        &reporter,
        &Platform::parse("windows"),
        "multipass",
        &InstallConfig::default(),
        policy(2, 120),
    )
    .await
    .expect_err("windows has no install path");

    assert!(matches!(err, ProviderError::UnsupportedPlatform { .. }));
    assert!(runner.calls().is_empty());
    assert!(reporter.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn readiness_gives_up_after_policy_is_exhausted() {
    let runner = MockCommandRunner::exiting(1);
    let reporter = CollectingReporter::default();
    let started = tokio::time::Instant::now();

    let err = installer::wait_until_ready(&runner, &reporter, "multipass", policy(2, 6))
        .await
        .expect_err("never ready");

    let ProviderError::ReadinessTimeout {
        attempts,
        waited_secs,
        ..
    } = err
    else {
        panic!("expected ReadinessTimeout, got {err:?}");
    };
    assert_eq!(attempts, 4);
    assert_eq!(waited_secs, 6);
    assert_eq!(runner.calls().len(), 4);
    assert!(started.elapsed() >= Duration::from_secs(6));
    assert_eq!(reporter.messages(), ["Waiting for multipass..."]);
}

#[tokio::test(start_paused = true)]
async fn ensure_ready_installs_when_approved() {
    let resolver = MockResolver::with(&["snap"]);
    let installed = resolver.clone();
    let runner = MockCommandRunner::ok()
        .with_stdout(VERSION_OUTPUT)
        .on_interactive(move || installed.add("multipass"));
    let reporter = CollectingReporter::default();

    let path = installer::ensure_ready(
        &resolver,
        &runner,
        &reporter,
        &Platform::Linux,
        &BuildvmConfig::default(),
        || true,
    )
    .await
    .expect("installed");

    assert_eq!(path, std::path::PathBuf::from("/usr/bin/multipass"));
    assert_eq!(runner.argvs()[0][0], "sudo");
}

#[tokio::test]
async fn ensure_ready_respects_a_declined_prompt() {
    let resolver = MockResolver::with(&["snap"]);
    let runner = MockCommandRunner::ok();
    let reporter = CollectingReporter::default();

    let err = installer::ensure_ready(
        &resolver,
        &runner,
        &reporter,
        &Platform::Linux,
        &BuildvmConfig::default(),
        || false,
    )
    .await
    .expect_err("declined");

    assert!(matches!(
        err,
        ProviderError::ToolNotFound {
            prompt_installable: true,
            ..
        }
    ));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn ensure_ready_never_prompts_when_not_installable() {
    let resolver = MockResolver::default();
    let runner = MockCommandRunner::ok();
    let reporter = CollectingReporter::default();

    let err = installer::ensure_ready(
        &resolver,
        &runner,
        &reporter,
        &Platform::Linux,
        &BuildvmConfig::default(),
        || panic!("must not prompt without snap"),
    )
    .await
    .expect_err("no snap");

    assert!(matches!(
        err,
        ProviderError::ToolNotFound {
            prompt_installable: false,
            ..
        }
    ));
}
