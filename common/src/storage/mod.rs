//! # Blob storage boundary
//!
//! The engine persists through an opaque key-value blob store: `get(key)` and
//! `set(key, bytes)`, nothing else. Each repository keeps its whole collection
//! under one fixed key and rewrites it on every change.
//!
//! `MemoryBlobStore` lives here for embedders and tests; the server provides a
//! SQLite-backed implementation.

mod memory;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PersistenceError, StorageError};

pub use memory::MemoryBlobStore;

/// Key holding the serialized list of all templates.
pub const TEMPLATES_KEY: &str = "templates";
/// Key holding the serialized list of all submissions.
pub const SUBMISSIONS_KEY: &str = "submissions";

/// Opaque key-value blob store.
pub trait BlobStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Reads the collection stored under `key`.
///
/// Absent, unreadable or unparseable data yields an empty collection; the
/// failure is logged and never propagated.
pub(crate) fn load_collection<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Vec<T> {
    match store.get(key) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!("Discarding unparseable `{}` blob: {}", key, e);
                Vec::new()
            }
        },
        Ok(None) => {
            debug!("No `{}` blob stored yet", key);
            Vec::new()
        }
        Err(e) => {
            warn!("Could not read `{}` blob, starting empty: {}", key, e);
            Vec::new()
        }
    }
}

/// Serializes the full collection and writes it under `key`.
pub(crate) fn write_collection<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    items: &[T],
) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(items).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store
        .set(key, &bytes)
        .map_err(|source| PersistenceError::Write {
            key: key.to_string(),
            source,
        })?;
    debug!("Wrote {} item(s) to `{}` ({} bytes)", items.len(), key, bytes.len());
    Ok(())
}
