//! Client-resident persistence tier for the storefront application.
//!
//! Three pieces, bottom up:
//! - [`storage`]: typed whole-collection read/write over a capacity-limited
//!   key-value sink; failures degrade to defaults and log entries, never to
//!   caller-visible errors.
//! - [`eviction`]: waterfall reclamation of disposable namespaces when a
//!   write hits the storage budget.
//! - [`recording`]: bounded session recording, the tier's heaviest consumer.
//!
//! Domain repositories (orders, users, forum, ...) are plain consumers of
//! [`storage::PersistentStore`] under the keys in [`namespaces`].

pub mod configuration;
pub mod error_handling;
pub mod eviction;
pub mod namespaces;
pub mod recording;
pub mod storage;

pub use configuration::StoreConfig;
pub use eviction::EvictionCoordinator;
pub use recording::{InteractionRecorder, SessionRecord};
pub use storage::PersistentStore;
