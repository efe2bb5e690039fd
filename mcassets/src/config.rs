//! Where to read from and where to write to.

use anyhow::Result;
use mcassets_core::{Platform, PlatformDirs, store_root};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the launcher data directory.
pub const ROOT_ENV: &str = "MCASSETS_ROOT";

/// Environment variable overriding the output directory.
pub const OUTPUT_ENV: &str = "MCASSETS_OUTPUT";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "unpacked_minecraft_assets";

/// Resolved paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Launcher data directory (the one containing `assets/`).
    pub store_root: PathBuf,
    /// Directory receiving one subdirectory per unpacked version.
    pub output_root: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn resolve(root: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        Self::resolve_with(root, output, |key| std::env::var_os(key), || {
            Ok(store_root(Platform::current()?, &PlatformDirs::from_env())?)
        })
    }

    /// Resolve settings: CLI arg > env var > default.
    ///
    /// `locate` is only called when neither the CLI nor the environment
    /// names a store root.
    pub fn resolve_with(
        root: Option<PathBuf>,
        output: Option<PathBuf>,
        env: impl Fn(&str) -> Option<OsString>,
        locate: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let store_root = match root.or_else(|| env(ROOT_ENV).map(PathBuf::from)) {
            Some(root) => root,
            None => locate()?,
        };

        let output_root = output
            .or_else(|| env(OUTPUT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(Self {
            store_root,
            output_root,
        })
    }
}
