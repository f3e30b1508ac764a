//! Key-Value Store Port
//!
//! Defines the interface for the persistent storage behind the location cache.

use crate::domain::errors::StorageError;
use async_trait::async_trait;

/// String-keyed, string-valued persistent storage.
///
/// Mirrors the shape of browser local storage: one value per key,
/// writes replace the previous value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
