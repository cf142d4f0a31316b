//! Infrastructure implementation of the `PathResolver` port.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::application::ports::PathResolver;

/// Looks executables up on the process `PATH`.
///
/// A `search_path` can be pinned for tests; otherwise `PATH` is read on
/// every lookup so changes made by an installer are picked up.
#[derive(Debug, Default, Clone)]
pub struct SystemPathResolver {
    search_path: Option<OsString>,
}

impl SystemPathResolver {
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl PathResolver for SystemPathResolver {
    fn find_executable(&self, program: &str) -> Option<PathBuf> {
        let path = match &self.search_path {
            Some(p) => p.clone(),
            None => std::env::var_os("PATH")?,
        };
        std::env::split_paths(&path).find_map(|dir| candidate(&dir, program))
    }
}

#[cfg(unix)]
fn candidate(dir: &Path, program: &str) -> Option<PathBuf> {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(program);
    let meta = std::fs::metadata(&path).ok()?;
    (meta.is_file() && meta.permissions().mode() & 0o111 != 0).then_some(path)
}

#[cfg(windows)]
fn candidate(dir: &Path, program: &str) -> Option<PathBuf> {
    ["", ".exe", ".cmd", ".bat"]
        .iter()
        .map(|ext| dir.join(format!("{program}{ext}")))
        .find(|p| p.is_file())
}
