//! `buildvm setup`: make sure multipass is installed and answering.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run `buildvm setup`.
///
/// # Errors
///
/// Returns an error if multipass is missing and cannot be installed.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let path = app.ensure_ready().await?;
    app.output.success(&format!(
        "{} is ready ({})",
        app.config.provider.executable,
        path.display()
    ));
    Ok(ExitCode::SUCCESS)
}
