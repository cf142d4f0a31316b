//! VM manager bootstrap: install, then wait for the daemon to answer.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::PathBuf;
use std::process::Output;

use tokio::time::Instant;

use crate::application::ports::{CommandRunner, PROVIDER_NAME, PathResolver, ProgressReporter};
use crate::application::services::locator;
use crate::domain::config::{BuildvmConfig, InstallConfig};
use crate::domain::error::command_line;
use crate::domain::{CommandFailure, Platform, ProviderError, ReadinessPolicy, args};

/// Install the VM manager and block until it responds.
///
/// Unsupported platforms fail before anything is run or reported.
///
/// # Errors
///
/// Returns [`ProviderError::UnsupportedPlatform`] on platforms without an
/// install path, [`ProviderError::InstallFailed`] when the package manager
/// fails, and [`ProviderError::ReadinessTimeout`] when the daemon never answers.
pub async fn install(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    platform: &Platform,
    tool: &str,
    config: &InstallConfig,
    policy: ReadinessPolicy,
) -> Result<(), ProviderError> {
    let Some((program, install_args)) = args::install(platform, PROVIDER_NAME, config) else {
        return Err(ProviderError::UnsupportedPlatform {
            tool: PROVIDER_NAME.to_string(),
            platform: platform.to_string(),
        });
    };

    let argv = command_line(program, &install_args);
    tracing::info!(%platform, command = ?argv, "installing VM manager");
    // sudo and brew may need to prompt, so the terminal stays attached.
    let status = runner
        .run_interactive(program, &install_args)
        .await
        .map_err(|e| ProviderError::InstallFailed {
            tool: PROVIDER_NAME.to_string(),
            failure: CommandFailure::not_run(argv.clone(), format!("{e:#}")),
        })?;
    if !status.success() {
        return Err(ProviderError::InstallFailed {
            tool: PROVIDER_NAME.to_string(),
            failure: CommandFailure::exited(argv, status.code()),
        });
    }

    wait_until_ready(runner, reporter, tool, policy).await
}

/// Substring of `<tool> version` output that only the daemon contributes.
///
/// The client prints its own version line even when the daemon is down.
pub const DAEMON_MARKER: &str = "multipassd";

fn daemon_answered(output: &Output) -> bool {
    output.status.success() && String::from_utf8_lossy(&output.stdout).contains(DAEMON_MARKER)
}

/// Poll `<tool> version` until the daemon answers or the policy runs out.
///
/// Reports a single progress message before the first probe. The whole
/// poll, probes included, is bounded by `policy.timeout`.
///
/// # Errors
///
/// Returns [`ProviderError::ReadinessTimeout`] once `policy` is exhausted.
pub async fn wait_until_ready(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    tool: &str,
    policy: ReadinessPolicy,
) -> Result<(), ProviderError> {
    reporter.step(&format!("Waiting for {PROVIDER_NAME}..."));

    let probe = args::version();
    let max_attempts = policy.max_attempts();
    let started = Instant::now();
    let deadline = started + policy.timeout;
    let mut attempts = 0;

    loop {
        attempts += 1;
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, runner.run_captured(tool, &probe)).await {
            Ok(Ok(output)) if daemon_answered(&output) => {
                tracing::info!(attempt = attempts, "VM manager is ready");
                return Ok(());
            }
            Ok(Ok(output)) => {
                tracing::debug!(attempt = attempts, code = ?output.status.code(), "VM manager not ready");
            }
            Ok(Err(e)) => {
                tracing::debug!(attempt = attempts, error = %e, "readiness probe failed to run");
            }
            Err(_) => tracing::debug!(attempt = attempts, "readiness probe outlived the deadline"),
        }
        if attempts >= max_attempts || Instant::now() + policy.interval > deadline {
            break;
        }
        tokio::time::sleep(policy.interval).await;
    }

    Err(ProviderError::ReadinessTimeout {
        tool: tool.to_string(),
        attempts,
        waited_secs: started.elapsed().as_secs(),
    })
}

/// Make sure the VM manager is usable, installing it if the caller agrees.
///
/// `approve` is only consulted when the tool is missing and installable.
///
/// # Errors
///
/// Returns the presence error when the tool is missing and cannot or may not
/// be installed, or any error from [`install`].
pub async fn ensure_ready(
    resolver: &impl PathResolver,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    platform: &Platform,
    config: &BuildvmConfig,
    approve: impl FnOnce() -> bool,
) -> Result<PathBuf, ProviderError> {
    let tool = config.provider.executable.as_str();
    let err = match locator::ensure_present(resolver, tool, platform) {
        Ok(path) => return Ok(path),
        Err(err) => err,
    };
    let installable = matches!(
        err,
        ProviderError::ToolNotFound {
            prompt_installable: true,
            ..
        }
    );
    if !installable || !approve() {
        return Err(err);
    }

    install(
        runner,
        reporter,
        platform,
        tool,
        &config.install,
        config.readiness.policy(),
    )
    .await?;
    locator::ensure_present(resolver, tool, platform)
}
