//! Presence check for the VM manager executable.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::PathBuf;

use crate::application::ports::PathResolver;
use crate::domain::{Platform, ProviderError};

/// Secondary packaging tool that makes the VM manager installable on Linux.
pub const SNAP: &str = "snap";

/// Locate `tool` on PATH.
///
/// # Errors
///
/// Returns [`ProviderError::ToolNotFound`] when the executable is missing.
/// `prompt_installable` is true on Linux hosts that have `snap`, always true
/// on macOS, and false everywhere else.
pub fn ensure_present(
    resolver: &impl PathResolver,
    tool: &str,
    platform: &Platform,
) -> Result<PathBuf, ProviderError> {
    if let Some(path) = resolver.find_executable(tool) {
        tracing::debug!(tool, path = %path.display(), "VM manager found");
        return Ok(path);
    }

    let snap_present = *platform == Platform::Linux && resolver.find_executable(SNAP).is_some();
    let prompt_installable = platform.prompt_installable(snap_present);
    tracing::warn!(tool, %platform, prompt_installable, "VM manager not found on PATH");
    Err(ProviderError::ToolNotFound {
        tool: tool.to_string(),
        prompt_installable,
    })
}
