use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::StorageError;
use crate::storage::BlobStore;

/// In-process blob store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
