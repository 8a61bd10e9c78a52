//! Session recording subsystem.
//!
//! Captures a live, unbounded stream of interaction events for at most one
//! session, compacts it to a fixed ceiling at session end, and persists a
//! small most-recent-first history through the storage subsystem.

pub mod recorder;
pub mod types;

pub use recorder::{InteractionRecorder, EVENT_CEILING, HEAD_KEEP, HISTORY_LIMIT, MIN_PERSIST_EVENTS};
pub use types::{DeviceClass, InteractionEvent, SessionRecord};
