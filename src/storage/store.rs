use std::sync::Arc;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::configuration::StoreConfig;
use crate::error_handling::types::StorageError;
use crate::eviction::EvictionCoordinator;
use crate::storage::file_sink::FileSink;
use crate::storage::memory_sink::MemorySink;
use crate::storage::sink_trait::StorageSink;

/// Typed whole-collection read/write over a [`StorageSink`].
///
/// This is the surface every repository talks to. The contract is that
/// storage is best-effort and never a crash source: `read` degrades to the
/// caller's default on absence or corruption, and `write` always returns
/// normally, routing any failure to the log instead of the caller. A write
/// refused for lack of capacity is handed to the [`EvictionCoordinator`]
/// before being given up on.
pub struct PersistentStore {
    sink: Arc<dyn StorageSink>,
    eviction: EvictionCoordinator,
}

impl PersistentStore {
    pub fn new(sink: Arc<dyn StorageSink>, eviction: EvictionCoordinator) -> Self {
        Self { sink, eviction }
    }

    /// Wires up a store from configuration: file-backed when a storage path
    /// is set, in-memory otherwise.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StorageError> {
        let sink: Arc<dyn StorageSink> = match &config.storage_path {
            Some(path) => Arc::new(FileSink::new(path, config.quota_bytes)?),
            None => Arc::new(MemorySink::new(config.quota_bytes)),
        };
        Ok(Self::new(
            sink,
            EvictionCoordinator::new(config.eviction_priority.clone()),
        ))
    }

    /// Reads and deserializes the collection stored under `key`.
    ///
    /// Absence, a prior eviction, and corrupt bytes are indistinguishable to
    /// the caller: all three yield `default`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let bytes = match self.sink.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return default,
            Err(e) => {
                error!("read of '{}' failed: {}", key, e);
                return default;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                // corrupt value is treated as never written
                debug!("stored value under '{}' failed to parse: {}", key, e);
                default
            }
        }
    }

    /// Serializes `value` and stores it under `key`.
    ///
    /// Never raises: a recognized capacity failure triggers eviction and
    /// retry, anything else is logged and the write abandoned.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("serialization of '{}' failed, write dropped: {}", key, e);
                return;
            }
        };
        match self.sink.put(key, &bytes) {
            Ok(()) => debug!("wrote {} byte(s) under '{}'", bytes.len(), key),
            Err(StorageError::QuotaExceeded) => {
                warn!("write of '{}' hit the storage budget, evicting", key);
                self.eviction.reclaim_and_retry(self.sink.as_ref(), key, &bytes);
            }
            Err(e) => error!("write of '{}' failed: {}", key, e),
        }
    }

    /// Namespace keys currently holding a value.
    pub fn stored_keys(&self) -> Vec<String> {
        match self.sink.keys() {
            Ok(keys) => keys,
            Err(e) => {
                error!("key listing failed: {}", e);
                Vec::new()
            }
        }
    }
}
