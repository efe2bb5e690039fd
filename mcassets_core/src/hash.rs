//! Object hashes as they appear in asset indexes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Object digest size in bytes (the launcher names objects by SHA-1).
pub const HASH_SIZE: usize = 20;

/// A validated object hash: 40 lowercase hex characters.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHash(String);

impl ObjectHash {
    /// Parse a hash from its hex form.
    ///
    /// Returns a description of the problem on failure; callers attach the
    /// file or entry it came from.
    pub fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != HASH_SIZE * 2 {
            return Err(format!(
                "expected {} hex characters, got {}",
                HASH_SIZE * 2,
                hex_str.len()
            ));
        }

        if hex_str.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(format!("hash must be lowercase: {}", hex_str));
        }

        hex::decode(hex_str).map_err(|e| format!("invalid hex in {}: {}", hex_str, e))?;

        Ok(ObjectHash(hex_str.to_string()))
    }

    /// The full hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the first 2 hex characters (the shard directory).
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHash({})", self.0)
    }
}

impl Serialize for ObjectHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
