//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the output context and the loaded configuration, and
//! hands out a ready-to-use provider once the VM manager is known to be
//! present.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::installer;
use crate::domain::{BuildvmConfig, Platform};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::multipass::MultipassProvider;
use crate::infra::path::SystemPathResolver;
use crate::output::{OutputContext, TerminalReporter};

/// Production provider type handed to command handlers.
pub type Provider = MultipassProvider<TokioCommandRunner>;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Skip interactive prompts and accept the default answer.
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Persistent configuration backend.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: BuildvmConfig,
    /// When `true`, skip interactive prompts and approve installs.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `BUILDVM_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("BUILDVM_YES").is_ok();
        let config_store = YamlConfigStore;
        let config = config_store.load()?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            config_store,
            config,
            non_interactive: flags.yes || ci_env,
        })
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` returns `default` immediately. When
    /// no terminal is attached the answer is `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        if !self.output.can_prompt() {
            return Ok(false);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    /// Runner for VM manager commands, bounded by the configured timeout.
    #[must_use]
    pub fn runner(&self) -> TokioCommandRunner {
        TokioCommandRunner::new(self.config.command_timeout())
    }

    /// Locate the VM manager, offering to install it when missing.
    ///
    /// # Errors
    ///
    /// Returns the bootstrap error when the VM manager is missing and is not
    /// (or may not be) installed, or when installation fails.
    pub async fn ensure_ready(&self) -> Result<PathBuf> {
        let resolver = SystemPathResolver::default();
        let reporter = TerminalReporter::new(&self.output);
        let tool = &self.config.provider.executable;

        let path = installer::ensure_ready(
            &resolver,
            &self.runner(),
            &reporter,
            &Platform::current(),
            &self.config,
            || {
                self.confirm(&format!("{tool} is not installed. Install it now?"), true)
                    .unwrap_or_else(|e| {
                        tracing::warn!("install prompt failed: {e:#}");
                        false
                    })
            },
        )
        .await?;
        tracing::debug!(path = %path.display(), "using VM manager");
        Ok(path)
    }

    /// Provider for the VM manager, after [`Self::ensure_ready`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::ensure_ready`].
    pub async fn provider(&self) -> Result<Provider> {
        self.ensure_ready().await?;
        Ok(MultipassProvider::with_program(
            self.runner(),
            self.config.provider.executable.clone(),
        ))
    }
}
