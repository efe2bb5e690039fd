//! Asset index parsing and the hash -> logical path index built from it.
//!
//! An asset index is a JSON document of the form:
//!
//! ```json
//! {
//!   "objects": {
//!     "minecraft/sounds/random/click.ogg": { "hash": "<40 hex>", "size": 1234 }
//!   }
//! }
//! ```
//!
//! Other top-level keys (`virtual`, `map_to_resources`) and descriptor fields
//! other than `hash` are ignored. A path repeated inside `objects` keeps its
//! first position and takes the last descriptor, as a JSON object would.

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// What an asset index says about one logical file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectDescriptor {
    /// Name of the object in the store.
    pub hash: ObjectHash,
}

/// A parsed asset index, entries in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetIndex {
    #[serde(default)]
    objects: DeclaredObjects,
}

/// The `objects` map, kept in the order it was written.
#[derive(Debug, Clone, Default)]
struct DeclaredObjects(Vec<(String, ObjectDescriptor)>);

impl<'de> Deserialize<'de> for DeclaredObjects {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DeclaredObjectsVisitor;

        impl<'de> Visitor<'de> for DeclaredObjectsVisitor {
            type Value = DeclaredObjects;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of logical paths to object descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, ObjectDescriptor)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut positions: HashMap<String, usize> = HashMap::new();

                while let Some((path, descriptor)) =
                    map.next_entry::<String, ObjectDescriptor>()?
                {
                    match positions.get(&path) {
                        Some(&pos) => entries[pos].1 = descriptor,
                        None => {
                            positions.insert(path.clone(), entries.len());
                            entries.push((path, descriptor));
                        }
                    }
                }
                Ok(DeclaredObjects(entries))
            }
        }

        deserializer.deserialize_map(DeclaredObjectsVisitor)
    }
}

impl AssetIndex {
    /// Read and parse the asset index at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let index = Self::parse(path, &bytes)?;
        info!(
            path = %path.display(),
            entries = index.len(),
            "loaded asset index"
        );
        Ok(index)
    }

    /// Parse asset index JSON. `path` is only used for error context.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::manifest_parse(path, e.to_string()))
    }

    /// Entries in declaration order, one per distinct logical path.
    pub fn entries(&self) -> &[(String, ObjectDescriptor)] {
        &self.objects.0
    }

    /// Number of declared logical paths.
    pub fn len(&self) -> usize {
        self.objects.0.len()
    }

    /// Whether the index declares no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.0.is_empty()
    }

    /// Invert path -> descriptor into hash -> path.
    ///
    /// When several paths share a hash, the one declared last is kept.
    pub fn object_index(&self) -> ObjectIndex {
        self.entries()
            .iter()
            .map(|(path, descriptor)| (descriptor.hash.clone(), path.clone()))
            .collect()
    }
}

/// Hash -> logical path mapping.
///
/// Iterates in order of each hash's first appearance; a repeated hash
/// replaces the stored path in place.
#[derive(Debug, Clone, Default)]
pub struct ObjectIndex {
    entries: Vec<(ObjectHash, String)>,
    positions: HashMap<ObjectHash, usize>,
}

impl ObjectIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `hash` to `path`, returning the path it replaced.
    pub fn insert(&mut self, hash: ObjectHash, path: String) -> Option<String> {
        match self.positions.get(&hash) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, path)),
            None => {
                self.positions.insert(hash.clone(), self.entries.len());
                self.entries.push((hash, path));
                None
            }
        }
    }

    /// Logical path currently mapped to `hash`.
    pub fn get(&self, hash: &ObjectHash) -> Option<&str> {
        self.positions
            .get(hash)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectHash, &str)> {
        self.entries.iter().map(|(hash, path)| (hash, path.as_str()))
    }
}

impl FromIterator<(ObjectHash, String)> for ObjectIndex {
    fn from_iter<I: IntoIterator<Item = (ObjectHash, String)>>(iter: I) -> Self {
        let mut index = ObjectIndex::new();
        for (hash, path) in iter {
            index.insert(hash, path);
        }
        index
    }
}
