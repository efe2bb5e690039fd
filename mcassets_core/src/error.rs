//! Error types for mcassets_core.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using mcassets_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a version selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionFault {
    /// Input is not a non-negative decimal integer.
    NotANumber,
    /// Input parsed, but there is no version at that position.
    OutOfRange { count: usize },
    /// Input names a version that is not in the indexes directory.
    UnknownVersion,
}

impl fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionFault::NotANumber => write!(f, "number"),
            SelectionFault::OutOfRange { count } => write!(f, "choice (expected 0..{})", count),
            SelectionFault::UnknownVersion => write!(f, "version"),
        }
    }
}

/// Errors that can occur while locating, reading or unpacking an asset store.
#[derive(Error, Debug)]
pub enum Error {
    /// No store location is known for this operating system.
    #[error("System \"{platform}\" is not supported")]
    UnsupportedPlatform { platform: String },

    /// The platform is known, but a directory it depends on could not be determined.
    #[error("Can't determine asset store location: {reason}")]
    StoreRootUnresolved { reason: String },

    /// The launcher data directory does not exist.
    #[error("Can't find {path}")]
    StoreRootNotFound { path: PathBuf },

    /// `assets/indexes` is missing under the store root.
    #[error("Can't find {path}")]
    IndexDirectoryNotFound { path: PathBuf },

    /// `assets/objects` is missing under the store root.
    #[error("Can't find {path}")]
    ObjectDirectoryNotFound { path: PathBuf },

    /// The indexes directory holds no `.json` asset index.
    #[error("There's no available versions in {path}")]
    NoVersionsAvailable { path: PathBuf },

    /// The user picked something that is not a listed version.
    #[error("\"{input}\" is not a valid {fault}")]
    InvalidSelection { input: String, fault: SelectionFault },

    /// The asset index could not be parsed.
    #[error("Malformed asset index {path}: {reason}")]
    ManifestParseError { path: PathBuf, reason: String },

    /// The asset index references an object that is not in the store.
    #[error("Object {hash} not found at {path}")]
    ObjectMissing { hash: String, path: PathBuf },

    /// Copying an object to its logical path failed.
    #[error("Failed to copy {from} to {to}: {source}")]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// A logical path would resolve outside the destination root.
    #[error("Refusing to unpack \"{path}\": path escapes the destination directory")]
    UnsafeLogicalPath { path: String },

    /// I/O error outside of the copy step.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an UnsupportedPlatform error.
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Error::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create a StoreRootUnresolved error.
    pub fn store_root_unresolved(reason: impl Into<String>) -> Self {
        Error::StoreRootUnresolved {
            reason: reason.into(),
        }
    }

    /// Create an InvalidSelection error.
    pub fn invalid_selection(input: impl Into<String>, fault: SelectionFault) -> Self {
        Error::InvalidSelection {
            input: input.into(),
            fault,
        }
    }

    /// Create a ManifestParseError error.
    pub fn manifest_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ManifestParseError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an ObjectMissing error.
    pub fn object_missing(hash: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::ObjectMissing {
            hash: hash.into(),
            path: path.into(),
        }
    }

    /// Create a CopyError error.
    pub fn copy_error(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::CopyError {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Create an UnsafeLogicalPath error.
    pub fn unsafe_logical_path(path: impl Into<String>) -> Self {
        Error::UnsafeLogicalPath { path: path.into() }
    }
}
