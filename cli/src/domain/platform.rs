//! Host platform classification.
//!
//! Pure functions only. The platform string is supplied by the caller so
//! that presence checks and install strategies can be exercised for any
//! host from any host.

use std::fmt;

/// Host platform, as far as bootstrapping the VM manager is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    /// Any platform this layer cannot install the VM manager on.
    Other(String),
}

impl Platform {
    /// Classify a platform identifier.
    ///
    /// Accepts both `"darwin"` and `"macos"` (the value of
    /// `std::env::consts::OS` on Apple hosts).
    #[must_use]
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "darwin" | "macos" => Self::Darwin,
            _ => Self::Other(id.to_string()),
        }
    }

    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Whether the user can be offered an automatic install of the VM manager.
    ///
    /// On Linux this depends on the `snap` packaging tool being present.
    /// macOS assumes Homebrew. Every other platform is never installable.
    #[must_use]
    pub fn prompt_installable(&self, snap_present: bool) -> bool {
        match self {
            Self::Linux => snap_present,
            Self::Darwin => true,
            Self::Other(_) => false,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::Darwin => f.write_str("darwin"),
            Self::Other(id) => f.write_str(id),
        }
    }
}
