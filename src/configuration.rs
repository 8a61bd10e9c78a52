//! Configuration for the persistence tier.

pub mod config;

pub use config::StoreConfig;
