//! Tests for `MultipassProvider` through the public port traits.
//!
//! Every operation must route through the right runner mode and turn a
//! non-zero exit into its own error variant, carrying the instance name and
//! the full command line.

#![allow(clippy::expect_used)]

use buildvm::application::ports::{InstanceLifecycle, VmProvider};
use buildvm::domain::{
    CopySpec, DeleteSpec, ExecSpec, InfoSpec, LaunchSpec, MountSpec, ProviderError, StopSpec,
};
use buildvm::infra::multipass::MultipassProvider;

use crate::mocks::{MockCommandRunner, Via};

/// Run every operation once, pairing its label with the error it raised.
async fn run_all(provider: &impl VmProvider) -> Vec<(&'static str, Option<ProviderError>)> {
    vec![
        (
            "launch",
            provider
                .launch(&LaunchSpec::new("vm", "18.04"))
                .await
                .err(),
        ),
        ("shell", provider.shell("vm").await.err()),
        ("stop", provider.stop(&StopSpec::new("vm")).await.err()),
        ("delete", provider.delete(&DeleteSpec::new("vm")).await.err()),
        (
            "mount",
            provider
                .mount(&MountSpec::new("/src", "vm:/dst"))
                .await
                .err(),
        ),
        (
            "copy-files",
            provider
                .copy_files(&CopySpec::new("vm:/out", "/tmp/out"))
                .await
                .err(),
        ),
        (
            "exec",
            provider
                .exec(&ExecSpec::new("vm", ["true"]))
                .await
                .err(),
        ),
        ("info", provider.info(&InfoSpec::new("vm")).await.err()),
    ]
}

#[tokio::test]
async fn successful_runs_raise_nothing_and_use_the_right_mode() {
    let runner = MockCommandRunner::ok();
    for (op, err) in run_all(&MultipassProvider::new(runner.clone())).await {
        assert!(err.is_none(), "{op} failed: {err:?}");
    }

    let modes: Vec<(Via, String)> = runner
        .calls()
        .into_iter()
        .map(|(via, _, args)| (via, args[0].clone()))
        .collect();
    assert_eq!(
        modes,
        [
            (Via::Detached, "launch".to_string()),
            (Via::Interactive, "shell".to_string()),
            (Via::Detached, "stop".to_string()),
            (Via::Detached, "delete".to_string()),
            (Via::Detached, "mount".to_string()),
            (Via::Detached, "copy-files".to_string()),
            (Via::Detached, "exec".to_string()),
            (Via::Captured, "info".to_string()),
        ]
    );
}

#[tokio::test]
async fn each_failure_maps_to_its_own_variant() {
    let results = run_all(&MultipassProvider::new(MockCommandRunner::exiting(2))).await;

    let mut seen = std::collections::HashSet::new();
    for (op, err) in results {
        let err = err.unwrap_or_else(|| panic!("{op} should fail"));
        let matches_op = match op {
            "launch" => matches!(err, ProviderError::Launch { .. }),
            "shell" => matches!(err, ProviderError::Shell { .. }),
            "stop" => matches!(err, ProviderError::Stop { .. }),
            "delete" => matches!(err, ProviderError::Delete { .. }),
            "mount" => matches!(err, ProviderError::Mount { .. }),
            "copy-files" => matches!(err, ProviderError::FileCopy { .. }),
            "exec" => matches!(err, ProviderError::Exec { .. }),
            "info" => matches!(err, ProviderError::Info { .. }),
            _ => false,
        };
        assert!(matches_op, "{op} raised {err:?}");
        assert!(seen.insert(std::mem::discriminant(&err)), "{op} reused a variant");

        assert_eq!(err.instance_name(), Some("vm"), "{op}");
        assert_eq!(err.exit_code(), Some(2), "{op}");
        let line = err.command_line().expect("command line");
        assert_eq!(line[0], "multipass", "{op}");
        assert_eq!(line[1], op, "{op}");
    }
}

#[tokio::test]
async fn error_message_names_operation_and_command() {
    let runner = MockCommandRunner::exiting(1);
    let provider = MultipassProvider::new(runner);
    let err = provider
        .delete(&DeleteSpec::new("build-42"))
        .await
        .expect_err("should fail");
    let msg = err.to_string();
    assert!(msg.contains("failed to delete instance 'build-42'"), "{msg}");
    assert!(msg.contains("`multipass delete build-42 --purge`"), "{msg}");
    assert!(msg.contains("status 1"), "{msg}");
}

#[tokio::test]
async fn launch_with_every_option_builds_documented_argv() {
    let runner = MockCommandRunner::ok();
    let provider = MultipassProvider::new(runner.clone());
    provider
        .launch(
            &LaunchSpec::new("snapcraft-hello", "16.04")
                .remote("daily")
                .cpus("2")
                .memory("2G")
                .disk("8G"),
        )
        .await
        .expect("launch");

    assert_eq!(
        runner.argvs()[0],
        [
            "multipass",
            "launch",
            "daily:16.04",
            "--name",
            "snapcraft-hello",
            "--cpus",
            "2",
            "--mem",
            "2G",
            "--disk",
            "8G",
        ]
    );
}

#[tokio::test]
async fn typed_error_survives_anyhow_wrapping() {
    let provider = MultipassProvider::new(MockCommandRunner::exiting(3));

    let err: anyhow::Error = provider
        .stop(&StopSpec::new("vm"))
        .await
        .expect_err("stop should fail")
        .into();
    let err = err.context("cannot stop build VM");

    let typed = err
        .downcast_ref::<ProviderError>()
        .expect("ProviderError behind context");
    assert!(matches!(typed, ProviderError::Stop { .. }));
    assert_eq!(typed.instance_name(), Some("vm"));
    assert_eq!(typed.exit_code(), Some(3));
}
