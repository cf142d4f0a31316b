//! Tests for command handlers that add behaviour on top of the provider.

#![allow(clippy::expect_used)]

use std::process::ExitCode;

use buildvm::commands::exec::{self, ExecArgs};
use buildvm::infra::multipass::MultipassProvider;

use crate::mocks::{MockCommandRunner, Via};

fn exec_args() -> ExecArgs {
    ExecArgs {
        name: "vm".to_string(),
        command: vec!["make".to_string(), "-j4".to_string()],
    }
}

fn same(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

#[tokio::test]
async fn exec_success_exits_zero() {
    let runner = MockCommandRunner::ok();
    let provider = MultipassProvider::new(runner.clone());

    let code = exec::run(&exec_args(), &provider).await.expect("exec");

    assert!(same(code, ExitCode::SUCCESS));
    let calls = runner.calls();
    assert_eq!(calls[0].0, Via::Detached);
    assert_eq!(calls[0].2, ["exec", "vm", "--", "make", "-j4"]);
}

#[tokio::test]
async fn exec_passes_guest_exit_code_through() {
    let provider = MultipassProvider::new(MockCommandRunner::exiting(3));
    let code = exec::run(&exec_args(), &provider).await.expect("exit code, not error");
    assert!(same(code, ExitCode::from(3)));
}
