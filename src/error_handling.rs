//! Error types shared across the persistence tier.

pub mod types;
