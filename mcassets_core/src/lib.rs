//! # mcassets core
//!
//! Reads the Minecraft launcher's content-addressed asset store and unpacks it
//! into a directory tree named by logical paths.
//!
//! The launcher keeps one JSON asset index per version under
//! `assets/indexes/<version>.json`, mapping logical paths to object hashes,
//! and stores every object once under `assets/objects/<hh>/<hash>`.
//!
//! ## Example
//!
//! ```no_run
//! use mcassets_core::{AssetStore, Extractor, Platform, PlatformDirs, Silent, store_root};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Locate and open the store
//! let root = store_root(Platform::current()?, &PlatformDirs::from_env())?;
//! let store = AssetStore::open(&root)?;
//!
//! // Pick a version and invert its index
//! let versions = store.versions()?;
//! let objects = store.load_index(&versions[0])?.object_index();
//!
//! // Copy every object to its logical path
//! let extractor = Extractor::new(&store, format!("unpacked/{}", versions[0]));
//! let stats = extractor.extract(&objects, &mut Silent)?;
//! println!("{} files extracted", stats.files);
//! # Ok(())
//! # }
//! ```

mod error;
mod extract;
mod hash;
mod index;
mod platform;
mod select;
mod store;

pub use error::{Error, Result, SelectionFault};
pub use extract::{ExtractStats, Extractor, Progress, Silent};
pub use hash::ObjectHash;
pub use index::{AssetIndex, ObjectDescriptor, ObjectIndex};
pub use platform::{Platform, PlatformDirs, store_root};
pub use select::{find_version, parse_choice};
pub use store::{AssetStore, INDEX_EXTENSION};
