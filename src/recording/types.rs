//! Common data types used across the recording subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One captured interaction, e.g. a click, a scroll, a DOM mutation.
///
/// The payload is left as raw JSON: the recorder treats events as opaque and
/// only the admin viewer ever looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
}

impl InteractionEvent {
    pub fn new<K: Into<String>>(kind: K, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Coarse device classification for a recorded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Binary heuristic over the user agent string. Anything that does not
    /// look like a handheld is a desktop.
    pub fn classify(user_agent: &str) -> Self {
        const MOBILE_MARKERS: [&str; 4] = ["Mobile", "Android", "iPhone", "iPad"];
        if MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// The finalized, bounded representation of one recording session.
///
/// `duration` is preformatted as `minutes:seconds` with zero-padded seconds,
/// ready for the admin viewer. `events` holds at most the compaction ceiling
/// after finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: String,
    pub events: Vec<InteractionEvent>,
    pub device: DeviceClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phones_and_tablets_classify_as_mobile() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        assert_eq!(DeviceClass::classify(ua), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify("Android 14; Pixel 8"), DeviceClass::Mobile);
    }

    #[test]
    fn everything_else_classifies_as_desktop() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0";
        assert_eq!(DeviceClass::classify(ua), DeviceClass::Desktop);
        assert_eq!(DeviceClass::classify(""), DeviceClass::Desktop);
    }
}
