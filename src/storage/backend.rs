//! Backing media for persisted collections.
//!
//! A backend stores opaque JSON documents under string keys. Each `save`
//! replaces the whole document for that key; there is no locking across
//! calls, so the last writer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::database::DatabaseError;

/// Key/value medium that persisted collections are flushed to.
pub trait StorageBackend {
    /// Load the document stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Replace the document stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), DatabaseError>;

    /// Remove the document stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<(), DatabaseError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        (**self).remove(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        (**self).remove(key)
    }
}

/// In-process backend (for testing and throwaway sessions).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DatabaseError> {
        self.documents
            .lock()
            .map_err(|e| DatabaseError::QueryFailed(format!("memory backend poisoned: {}", e)))
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
