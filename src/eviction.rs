//! Capacity reclamation for the storage sink.
//!
//! When a write is refused for lack of room, the coordinator deletes
//! disposable namespaces one at a time, most disposable first, retrying the
//! blocked write after each deletion and stopping at the first success.

pub mod coordinator;

pub use coordinator::EvictionCoordinator;
