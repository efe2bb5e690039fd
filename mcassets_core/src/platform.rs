//! Locating the launcher data directory.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Launcher directory name on Windows and Unix-likes.
const DOT_MINECRAFT: &str = ".minecraft";

/// Launcher directory name under macOS Application Support.
const MACOS_APP_NAME: &str = "minecraft";

/// Operating system families with a known launcher layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `%APPDATA%\.minecraft`
    Windows,
    /// `~/.minecraft` (Linux, Cygwin)
    Unix,
    /// `~/Library/Application Support/minecraft`
    MacOs,
}

impl Platform {
    /// Map an operating system identifier to a platform.
    ///
    /// Accepts Rust's `std::env::consts::OS` names as well as the older
    /// `win32`/`darwin` spellings.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "windows" | "win32" => Ok(Platform::Windows),
            "linux" | "cygwin" => Ok(Platform::Unix),
            "macos" | "darwin" => Ok(Platform::MacOs),
            other => Err(Error::unsupported_platform(other)),
        }
    }

    /// The platform this binary was built for.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }
}

/// Environment-derived directories the locator builds on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformDirs {
    /// The user's home directory.
    pub home: Option<PathBuf>,
    /// Value of `APPDATA` (Windows only).
    pub app_data: Option<PathBuf>,
}

impl PlatformDirs {
    /// Collect directories from the running process's environment.
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir(),
            app_data: std::env::var_os("APPDATA").map(PathBuf::from),
        }
    }
}

/// Compute the store root for a platform.
///
/// Pure path computation: the filesystem is not consulted.
pub fn store_root(platform: Platform, dirs: &PlatformDirs) -> Result<PathBuf> {
    match platform {
        Platform::Windows => dirs
            .app_data
            .as_ref()
            .map(|app_data| app_data.join(DOT_MINECRAFT))
            .ok_or_else(|| Error::store_root_unresolved("APPDATA is not set")),
        Platform::Unix => home(dirs).map(|home| home.join(DOT_MINECRAFT)),
        Platform::MacOs => home(dirs).map(|home| {
            home.join("Library")
                .join("Application Support")
                .join(MACOS_APP_NAME)
        }),
    }
}

fn home(dirs: &PlatformDirs) -> Result<&PathBuf> {
    dirs.home
        .as_ref()
        .ok_or_else(|| Error::store_root_unresolved("home directory is unknown"))
}
