//! Hydration-aware persisted values.
//!
//! A [`PersistentStore`] holds one JSON-serializable value bound to a key in a
//! [`StorageBackend`]. It starts `Uninitialized` and serves the caller-supplied
//! default until [`PersistentStore::hydrate`] consults the medium once and
//! moves it to `Ready`. From then on every write lands in memory first and is
//! flushed synchronously.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::backend::StorageBackend;
use super::database::DatabaseError;

/// Hydration state of a persisted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    /// The backing medium has not been consulted yet.
    #[default]
    Uninitialized,
    /// The persisted value (if any) has been loaded.
    Ready,
}

/// Read a value stored under `key`, falling back to `default` when absent.
pub fn read_value<T, B>(backend: &B, key: &str, default: T) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    B: StorageBackend + ?Sized,
{
    match backend.load(key)? {
        Some(json) => serde_json::from_str(&json).map_err(|e| StorageError::Deserialization {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Serialize `value` and replace whatever is stored under `key`.
pub fn write_value<T, B>(backend: &B, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    B: StorageBackend + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    backend.save(key, &json)?;
    Ok(())
}

/// A value mirrored to one key of a storage backend.
#[derive(Debug, Clone)]
pub struct PersistentStore<T> {
    key: String,
    value: T,
    /// Latest write issued before hydration; applied on `hydrate`.
    pending: Option<T>,
    state: Hydration,
}

impl<T> PersistentStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Create an unhydrated store serving `default`.
    pub fn new(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            value: default,
            pending: None,
            state: Hydration::Uninitialized,
        }
    }

    /// Backend key this store is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current hydration state.
    pub fn state(&self) -> Hydration {
        self.state
    }

    /// Whether the store has been hydrated.
    pub fn is_ready(&self) -> bool {
        self.state == Hydration::Ready
    }

    /// Whether a write is waiting for hydration.
    pub fn has_pending_write(&self) -> bool {
        self.pending.is_some()
    }

    /// Current value. Before hydration this is always the default.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Load the persisted value once and transition to `Ready`.
    ///
    /// A write deferred before hydration wins over the persisted value and is
    /// flushed here. Calling this on a ready store does nothing.
    pub fn hydrate<B>(&mut self, backend: &B) -> Result<&T, StorageError>
    where
        B: StorageBackend + ?Sized,
    {
        if self.state == Hydration::Ready {
            return Ok(&self.value);
        }

        if let Some(pending) = self.pending.take() {
            write_value(backend, &self.key, &pending)?;
            self.value = pending;
            tracing::debug!(key = %self.key, "Hydrated with deferred write");
        } else if let Some(json) = backend.load(&self.key)? {
            self.value =
                serde_json::from_str(&json).map_err(|e| StorageError::Deserialization {
                    key: self.key.clone(),
                    message: e.to_string(),
                })?;
            tracing::debug!(key = %self.key, "Hydrated from backend");
        } else {
            tracing::debug!(key = %self.key, "Nothing persisted, keeping default");
        }

        self.state = Hydration::Ready;
        Ok(&self.value)
    }

    /// Replace the value.
    ///
    /// When ready, memory is updated before the flush, so a failed flush still
    /// leaves the in-memory value current. Before hydration the write is
    /// deferred until `hydrate`.
    pub fn set<B>(&mut self, backend: &B, value: T) -> Result<(), StorageError>
    where
        B: StorageBackend + ?Sized,
    {
        if self.state == Hydration::Uninitialized {
            tracing::debug!(key = %self.key, "Deferring write until hydration");
            self.pending = Some(value);
            return Ok(());
        }

        self.value = value;
        write_value(backend, &self.key, &self.value)
    }

    /// Modify the current value in place and flush it.
    ///
    /// Read-modify-write needs a known base, so this is rejected before
    /// hydration.
    pub fn update<B, F>(&mut self, backend: &B, f: F) -> Result<&T, StorageError>
    where
        B: StorageBackend + ?Sized,
        F: FnOnce(&mut T),
    {
        if self.state == Hydration::Uninitialized {
            return Err(StorageError::NotReady(self.key.clone()));
        }

        let mut next = self.value.clone();
        f(&mut next);
        self.set(backend, next)?;
        Ok(&self.value)
    }

    /// Re-read the backend, picking up writes made by other stores or
    /// processes since hydration.
    pub fn reload<B>(&mut self, backend: &B) -> Result<&T, StorageError>
    where
        B: StorageBackend + ?Sized,
    {
        if self.state == Hydration::Uninitialized {
            return self.hydrate(backend);
        }

        if let Some(json) = backend.load(&self.key)? {
            self.value =
                serde_json::from_str(&json).map_err(|e| StorageError::Deserialization {
                    key: self.key.clone(),
                    message: e.to_string(),
                })?;
        }
        Ok(&self.value)
    }
}

/// Errors raised while persisting values.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Backend error: {0}")]
    Backend(#[from] DatabaseError),

    #[error("Failed to serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("Failed to deserialize '{key}': {message}")]
    Deserialization { key: String, message: String },

    #[error("Store '{0}' has not been hydrated yet")]
    NotReady(String),
}
