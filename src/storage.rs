//! Storage subsystem
//!
//! This module provides the typed persistence layer and the sinks it sits on.
//!
//! Components:
//! - `sink_trait`: the StorageSink trait modeling the host's capacity-limited
//!   key-value facility.
//! - `memory_sink`: budget-enforcing in-memory sink (simulated host, tests).
//! - `file_sink`: filesystem-backed sink with the same budget accounting.
//! - `store`: PersistentStore, the typed whole-collection read/write surface
//!   with silent, logged failure handling.

pub mod file_sink;
pub mod memory_sink;
pub mod sink_trait;
pub mod store;

pub use file_sink::FileSink;
pub use memory_sink::MemorySink;
pub use sink_trait::StorageSink;
pub use store::PersistentStore;
