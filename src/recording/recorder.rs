//! Session recording orchestration.
//!
//! `InteractionRecorder` owns the live event buffer for at most one session
//! at a time. Capture is a plain in-memory append so arbitrarily bursty
//! event rates cost O(1) amortized per event; all bounding work is deferred
//! to `stop`, which compacts the buffer to the event ceiling, builds the
//! finalized [`SessionRecord`], and persists a short most-recent-first
//! history through [`PersistentStore`].
//!
//! The stop path is synchronous and bounded so it can run inside a
//! best-effort teardown hook that offers no guaranteed completion window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, trace};
use uuid::Uuid;

use crate::namespaces;
use crate::storage::PersistentStore;

use super::types::{DeviceClass, InteractionEvent, SessionRecord};

/// Hard ceiling on events kept in a finalized record.
pub const EVENT_CEILING: usize = 500;
/// Leading events always kept through compaction; they carry the initial
/// structural setup a faithful replay needs.
pub const HEAD_KEEP: usize = 50;
/// Sessions with fewer captured events than this are finalized but not
/// persisted.
pub const MIN_PERSIST_EVENTS: usize = 10;
/// Number of finalized sessions retained in storage.
pub const HISTORY_LIMIT: usize = 2;

/// Live state for the one in-flight recording.
struct ActiveRecording {
    id: Uuid,
    user_id: String,
    user_name: String,
    device: DeviceClass,
    start_time: DateTime<Utc>,
    events: Vec<InteractionEvent>,
}

/// Captures one session's interaction stream and persists bounded records.
///
/// Exactly one recording can be in flight; the `Option<ActiveRecording>`
/// is the single guard, so `start` while recording and `stop` while idle
/// are both no-ops. Recording is suppressed while the administrative view
/// is flagged active, so admin sessions are never captured and the viewer
/// cannot record itself.
pub struct InteractionRecorder {
    store: Arc<PersistentStore>,
    active: Option<ActiveRecording>,
    admin_view: bool,
}

impl InteractionRecorder {
    pub fn new(store: Arc<PersistentStore>) -> Self {
        Self {
            store,
            active: None,
            admin_view: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Flags whether the administrative view is currently on screen.
    pub fn set_admin_view(&mut self, active: bool) {
        self.admin_view = active;
    }

    /// Begins a new recording. No-op if one is already in flight or the
    /// administrative view is active.
    pub fn start<S: Into<String>>(&mut self, user_id: S, user_name: S, user_agent: &str) {
        if self.admin_view {
            debug!("recording suppressed: administrative view is active");
            return;
        }
        if let Some(ref active) = self.active {
            debug!("[{}] start ignored: recording already in flight", active.id);
            return;
        }
        let id = Uuid::new_v4();
        info!("[{}] recording started", id);
        self.active = Some(ActiveRecording {
            id,
            user_id: user_id.into(),
            user_name: user_name.into(),
            device: DeviceClass::classify(user_agent),
            start_time: Utc::now(),
            events: Vec::new(),
        });
    }

    /// Appends one event to the live buffer. Dropped silently while idle.
    pub fn capture(&mut self, event: InteractionEvent) {
        match self.active {
            Some(ref mut active) => {
                active.events.push(event);
                trace!(
                    "[{}] captured event #{}",
                    active.id,
                    active.events.len()
                );
            }
            None => trace!("event dropped: no recording in flight"),
        }
    }

    /// Finalizes the in-flight recording and returns the bounded record.
    ///
    /// The record is persisted to the session history only if at least
    /// [`MIN_PERSIST_EVENTS`] events were captured; short sessions are not
    /// worth a storage write. Idle `stop` is a no-op.
    pub fn stop(&mut self) -> Option<SessionRecord> {
        let active = match self.active.take() {
            Some(active) => active,
            None => {
                debug!("stop ignored: no recording in flight");
                return None;
            }
        };

        let captured = active.events.len();
        let end_time = Utc::now();
        let record = SessionRecord {
            id: active.id,
            user_id: active.user_id,
            user_name: active.user_name,
            start_time: active.start_time,
            end_time,
            duration: format_duration(end_time - active.start_time),
            events: compact(active.events),
            device: active.device,
        };
        info!(
            "[{}] recording stopped: {} event(s) captured, {} kept",
            record.id,
            captured,
            record.events.len()
        );

        if captured < MIN_PERSIST_EVENTS {
            debug!(
                "[{}] session too short to persist ({} event(s))",
                record.id, captured
            );
            return Some(record);
        }

        let mut history: Vec<SessionRecord> = self
            .store
            .read(namespaces::SESSION_RECORDINGS, Vec::new());
        history.insert(0, record.clone());
        history.truncate(HISTORY_LIMIT);
        self.store.write(namespaces::SESSION_RECORDINGS, &history);

        Some(record)
    }

    /// Stored session history, most recent first.
    pub fn history(&self) -> Vec<SessionRecord> {
        self.store.read(namespaces::SESSION_RECORDINGS, Vec::new())
    }
}

/// Bounds an oversized buffer to [`EVENT_CEILING`] events by keeping the
/// first [`HEAD_KEEP`] and the most recent remainder, preserving relative
/// order. Buffers at or under the ceiling pass through untouched.
fn compact(mut events: Vec<InteractionEvent>) -> Vec<InteractionEvent> {
    if events.len() <= EVENT_CEILING {
        return events;
    }
    let tail_keep = EVENT_CEILING - HEAD_KEEP;
    let tail_start = events.len() - tail_keep;
    events.drain(HEAD_KEEP..tail_start);
    events
}

/// Formats a session duration as `minutes:seconds`, seconds zero-padded.
fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
