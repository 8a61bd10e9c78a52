//! Storage Sink Trait
//!
//! This module defines the `StorageSink` trait, the interface to the host's
//! capacity-limited key-value facility.
//!
//! Implementors of this trait are responsible for:
//! - Storing one serialized blob per namespace key
//! - Reporting capacity exhaustion as `StorageError::QuotaExceeded`
//! - Freeing a namespace's space synchronously on `remove`
//!
//! All methods return a `Result` so the typed layer above can distinguish a
//! recoverable capacity failure from everything else.

use crate::error_handling::types::StorageError;

/// The `StorageSink` trait defines the interface to the host key-value
/// facility backing the persistence tier.
///
/// One value is stored per namespace key; reads and writes are whole-value.
/// A `put` that would exceed the sink's byte budget must fail with
/// [`StorageError::QuotaExceeded`] and leave the previous value (if any)
/// intact.
pub trait StorageSink: Send + Sync {
    /// Returns the stored bytes for `key`, or `None` if the namespace has
    /// never been written or was evicted.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Deletes the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> Result<bool, StorageError>;

    /// All keys currently holding a value, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}
