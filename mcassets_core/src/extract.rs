//! Copying objects out of the store into a readable tree.

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::index::ObjectIndex;
use crate::store::AssetStore;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Receives each object just before it is copied.
pub trait Progress {
    fn on_object(&mut self, hash: &ObjectHash, logical_path: &str) -> io::Result<()>;
}

/// Progress sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn on_object(&mut self, _hash: &ObjectHash, _logical_path: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Totals for a finished extraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    /// Number of objects copied.
    pub files: usize,
    /// Number of bytes written.
    pub bytes: u64,
}

/// Copies objects from a store into a destination root.
#[derive(Debug)]
pub struct Extractor<'a> {
    store: &'a AssetStore,
    destination: PathBuf,
}

impl<'a> Extractor<'a> {
    /// Create an extractor writing below `destination`.
    pub fn new(store: &'a AssetStore, destination: impl Into<PathBuf>) -> Self {
        Self {
            store,
            destination: destination.into(),
        }
    }

    /// Copy every object of `objects` to its logical path.
    ///
    /// Creates the destination root first, then processes entries in index
    /// order. The first failure aborts the run; files already copied stay.
    pub fn extract<P: Progress>(
        &self,
        objects: &ObjectIndex,
        progress: &mut P,
    ) -> Result<ExtractStats> {
        fs::create_dir_all(&self.destination)?;

        let mut stats = ExtractStats::default();
        for (hash, logical_path) in objects.iter() {
            progress.on_object(hash, logical_path)?;
            stats.bytes += self.extract_object(hash, logical_path)?;
            stats.files += 1;
        }

        Ok(stats)
    }

    /// Copy one object, returning the number of bytes written.
    pub fn extract_object(&self, hash: &ObjectHash, logical_path: &str) -> Result<u64> {
        let relative = checked_relative_path(logical_path)?;
        let source = self.store.object_path(hash);
        let dest = self.destination.join(relative);

        if !source.is_file() {
            return Err(Error::object_missing(hash.as_str(), source));
        }

        let bytes =
            copy_atomic(&source, &dest).map_err(|e| Error::copy_error(&source, &dest, e))?;
        debug!(%hash, dest = %dest.display(), bytes, "copied object");

        Ok(bytes)
    }
}

/// Reject logical paths that would land outside the destination root.
fn checked_relative_path(logical_path: &str) -> Result<&Path> {
    let path = Path::new(logical_path);
    let mut has_name = false;

    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::unsafe_logical_path(logical_path));
            }
        }
    }

    if !has_name {
        return Err(Error::unsafe_logical_path(logical_path));
    }

    Ok(path)
}

/// Copy `source` over `dest` through a temporary file next to `dest`.
fn copy_atomic(source: &Path, dest: &Path) -> io::Result<u64> {
    let parent = dest
        .parent()
        .ok_or_else(|| io::Error::other(format!("no parent directory for {}", dest.display())))?;
    fs::create_dir_all(parent)?;

    let mut input = fs::File::open(source)?;
    let permissions = input.metadata()?.permissions();

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    let bytes = io::copy(&mut input, &mut temp_file)?;
    temp_file.flush()?;
    fs::set_permissions(temp_file.path(), permissions)?;

    temp_file.persist(dest)?;

    Ok(bytes)
}
