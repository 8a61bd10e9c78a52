use log::{debug, error, info, warn};

use crate::error_handling::types::StorageError;
use crate::storage::sink_trait::StorageSink;

/// Reclaims sink capacity by deleting disposable namespaces in priority
/// order and retrying the blocked write after each deletion.
///
/// The list is ranked a priori, most disposable first, because the host sink
/// offers no cheap per-key size introspection; with a small namespace set an
/// explicit ranking is a sufficient approximation of "evict the least
/// valuable thing". Keys not on the list are never touched.
pub struct EvictionCoordinator {
    priority: Vec<String>,
}

impl EvictionCoordinator {
    pub fn new(priority: Vec<String>) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Retries the blocked `put` of `value` under `key`, deleting one
    /// disposable namespace before each attempt.
    ///
    /// Stops at the first successful retry so no more data is evicted than
    /// the write actually needs. The namespace being written is skipped
    /// unconditionally: a write must never evict the collection it is trying
    /// to save. Returns whether the write ultimately landed; on `false` the
    /// write is abandoned and the loss has been logged.
    pub fn reclaim_and_retry(&self, sink: &dyn StorageSink, key: &str, value: &[u8]) -> bool {
        for candidate in self.priority.iter().filter(|c| c.as_str() != key) {
            match sink.contains(candidate) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("eviction candidate '{}' holds no value, skipping", candidate);
                    continue;
                }
                Err(e) => {
                    error!("eviction probe of '{}' failed: {}", candidate, e);
                    continue;
                }
            }

            if let Err(e) = sink.remove(candidate) {
                error!("eviction of '{}' failed: {}", candidate, e);
                continue;
            }
            warn!("evicted namespace '{}' to make room for '{}'", candidate, key);

            match sink.put(key, value) {
                Ok(()) => {
                    info!("write of '{}' succeeded after evicting '{}'", key, candidate);
                    return true;
                }
                Err(StorageError::QuotaExceeded) => {
                    debug!("'{}' still over budget after evicting '{}'", key, candidate);
                }
                Err(e) => {
                    error!("retry of '{}' failed with unrelated error: {}", key, e);
                    return false;
                }
            }
        }

        error!(
            "storage budget could not be reclaimed, write of '{}' is lost",
            key
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_sink::MemorySink;

    fn coordinator(keys: &[&str]) -> EvictionCoordinator {
        EvictionCoordinator::new(keys.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn first_success_stops_the_walk() {
        let sink = MemorySink::new(10);
        sink.put("d1", b"12345").unwrap();
        sink.put("d2", b"12345").unwrap();

        let coord = coordinator(&["d1", "d2"]);
        assert!(coord.reclaim_and_retry(&sink, "orders", b"123"));

        // d1 alone freed enough room, so d2 must survive
        assert!(!sink.contains("d1").unwrap());
        assert!(sink.contains("d2").unwrap());
        assert_eq!(sink.get("orders").unwrap().unwrap(), b"123");
    }

    #[test]
    fn walks_past_candidates_that_free_too_little() {
        let sink = MemorySink::new(10);
        sink.put("small", b"1").unwrap();
        sink.put("big", b"123456789").unwrap();

        let coord = coordinator(&["small", "big"]);
        assert!(coord.reclaim_and_retry(&sink, "orders", b"12345678"));
        assert!(!sink.contains("small").unwrap());
        assert!(!sink.contains("big").unwrap());
    }

    #[test]
    fn never_evicts_the_key_being_written() {
        let sink = MemorySink::new(10);
        sink.put("orders", b"1234567890").unwrap();

        // "orders" is first on the list but is the key being saved
        let coord = coordinator(&["orders"]);
        assert!(!coord.reclaim_and_retry(&sink, "orders", b"too big for the budget"));
        assert_eq!(sink.get("orders").unwrap().unwrap(), b"1234567890");
    }

    #[test]
    fn empty_candidates_are_skipped() {
        let sink = MemorySink::new(10);
        sink.put("held", b"1234567890").unwrap();

        let coord = coordinator(&["absent", "held"]);
        assert!(coord.reclaim_and_retry(&sink, "orders", b"123"));
        assert!(!sink.contains("held").unwrap());
    }

    #[test]
    fn exhaustion_abandons_the_write() {
        let sink = MemorySink::new(4);
        sink.put("d1", b"1").unwrap();

        let coord = coordinator(&["d1"]);
        assert!(!coord.reclaim_and_retry(&sink, "orders", b"way too large"));
        assert!(sink.get("orders").unwrap().is_none());
    }

    #[test]
    fn unlisted_namespaces_are_never_touched() {
        let sink = MemorySink::new(10);
        sink.put("precious", b"1234567890").unwrap();

        let coord = coordinator(&["d1", "d2"]);
        assert!(!coord.reclaim_and_retry(&sink, "orders", b"123"));
        assert!(sink.contains("precious").unwrap());
    }
}
