//! Read-only view of a launcher asset store.

use crate::error::{Error, Result, SelectionFault};
use crate::hash::ObjectHash;
use crate::index::AssetIndex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of asset indexes.
pub const INDEX_EXTENSION: &str = "json";

/// The launcher's `assets` directory layout:
///
/// - `assets/indexes/<version>.json`
/// - `assets/objects/<hh>/<hash>`
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    indexes_dir: PathBuf,
    objects_dir: PathBuf,
}

impl AssetStore {
    /// Open the store under a launcher data directory.
    ///
    /// Checks, in order, that the root, `assets/indexes` and
    /// `assets/objects` exist.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            return Err(Error::StoreRootNotFound { path: root });
        }

        let assets = root.join("assets");
        let indexes_dir = assets.join("indexes");
        let objects_dir = assets.join("objects");

        if !indexes_dir.is_dir() {
            return Err(Error::IndexDirectoryNotFound { path: indexes_dir });
        }

        if !objects_dir.is_dir() {
            return Err(Error::ObjectDirectoryNotFound { path: objects_dir });
        }

        info!(root = %root.display(), "opened asset store");

        Ok(Self {
            root,
            indexes_dir,
            objects_dir,
        })
    }

    /// Get the root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn indexes_dir(&self) -> &Path {
        &self.indexes_dir
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Get the path to an object file given its hash.
    ///
    /// Returns: `assets/objects/{prefix}/{hash}`
    pub fn object_path(&self, hash: &ObjectHash) -> PathBuf {
        self.objects_dir.join(hash.prefix()).join(hash.as_str())
    }

    /// Get the path to the asset index of a version.
    pub fn index_path(&self, version: &str) -> PathBuf {
        self.indexes_dir.join(format!("{}.{}", version, INDEX_EXTENSION))
    }

    /// List available versions, sorted by name.
    ///
    /// A version is any `*.json` file directly inside the indexes directory.
    pub fn versions(&self) -> Result<Vec<String>> {
        let mut versions = Vec::new();

        for entry in fs::read_dir(&self.indexes_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(INDEX_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                debug!(version = stem, "found asset index");
                versions.push(stem.to_string());
            }
        }

        if versions.is_empty() {
            return Err(Error::NoVersionsAvailable {
                path: self.indexes_dir.clone(),
            });
        }

        versions.sort();
        Ok(versions)
    }

    /// Load the asset index of a listed version.
    pub fn load_index(&self, version: &str) -> Result<AssetIndex> {
        let path = self.index_path(version);
        if !path.is_file() {
            return Err(Error::invalid_selection(version, SelectionFault::UnknownVersion));
        }
        AssetIndex::load(&path)
    }
}
