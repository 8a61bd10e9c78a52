use std::collections::HashMap;
use std::sync::Mutex;

use log::{debug, trace};

use crate::error_handling::types::StorageError;
use crate::storage::sink_trait::StorageSink;

/// In-memory sink with a fixed byte budget.
///
/// Mirrors the host facility's behavior: values live under namespace keys,
/// and a `put` that would push the total stored size past the budget is
/// refused with [`StorageError::QuotaExceeded`] while the previous value
/// stays intact. Used as the simulated host in tests and as the sink for
/// ephemeral runs.
pub struct MemorySink {
    quota_bytes: usize,
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new(quota_bytes: usize) -> Self {
        debug!("MemorySink created with {} byte budget", quota_bytes);
        Self {
            quota_bytes,
            values: Mutex::new(HashMap::new()),
        }
    }

    fn used_bytes(values: &HashMap<String, Vec<u8>>) -> usize {
        values.values().map(|v| v.len()).sum()
    }
}

impl StorageSink for MemorySink {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let replaced = values.get(key).map(|v| v.len()).unwrap_or(0);
        let projected = Self::used_bytes(&values) - replaced + value.len();
        if projected > self.quota_bytes {
            trace!(
                "put of {} byte(s) under '{}' refused: {} of {} byte(s) in use",
                value.len(),
                key,
                Self::used_bytes(&values),
                self.quota_bytes
            );
            return Err(StorageError::QuotaExceeded);
        }
        values.insert(key.to_string(), value.to_vec());
        trace!("stored {} byte(s) under '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        if values.remove(key).is_some() {
            debug!("removed namespace '{}'", key);
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(values.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip() {
        let sink = MemorySink::new(1024);
        sink.put("users", b"some users").unwrap();
        assert_eq!(sink.get("users").unwrap().unwrap(), b"some users");
        assert!(sink.contains("users").unwrap());
    }

    #[test]
    fn get_absent_key_is_none() {
        let sink = MemorySink::new(1024);
        assert!(sink.get("orders").unwrap().is_none());
        assert!(!sink.contains("orders").unwrap());
    }

    #[test]
    fn put_past_budget_fails_with_quota() {
        let sink = MemorySink::new(10);
        sink.put("a", b"12345").unwrap();
        let err = sink.put("b", b"123456789").unwrap_err();
        assert!(err.is_quota_exceeded());
        // previous value untouched
        assert_eq!(sink.get("a").unwrap().unwrap(), b"12345");
        assert!(sink.get("b").unwrap().is_none());
    }

    #[test]
    fn replacement_accounts_for_old_value() {
        let sink = MemorySink::new(10);
        sink.put("a", b"1234567890").unwrap();
        // same key, same size: replacement fits even though the sink is full
        sink.put("a", b"abcdefghij").unwrap();
        assert_eq!(sink.get("a").unwrap().unwrap(), b"abcdefghij");
    }

    #[test]
    fn remove_frees_budget() {
        let sink = MemorySink::new(10);
        sink.put("a", b"1234567890").unwrap();
        assert!(sink.put("b", b"x").is_err());
        sink.remove("a").unwrap();
        sink.put("b", b"x").unwrap();
    }
}
