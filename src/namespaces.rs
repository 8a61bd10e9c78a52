//! Namespace keys used by the application's repositories.
//!
//! Every logical collection is stored whole under one of these keys. Keeping
//! the spellings in one place means the eviction priority list and the
//! repositories can never drift apart on a key name.

/// Finalized session recordings kept for the admin viewer.
pub const SESSION_RECORDINGS: &str = "session_recordings";
/// Raw analytics event log. Large and freely regenerable.
pub const ANALYTICS_EVENTS: &str = "analytics_events";
/// Application-level log lines mirrored into storage.
pub const SYSTEM_LOGS: &str = "system_logs";
/// Per-page visitor counters.
pub const VISITOR_COUNTERS: &str = "visitor_counters";
/// In-progress price negotiation drafts.
pub const NEGOTIATION_DRAFTS: &str = "negotiation_drafts";

pub const ORDERS: &str = "orders";
pub const USERS: &str = "users";
pub const CART: &str = "cart";
pub const FAVORITES: &str = "favorites";
pub const FORUM_TOPICS: &str = "forum_topics";
pub const STATS: &str = "stats";
pub const FEEDBACK: &str = "feedback";
pub const ROUTES: &str = "routes";

/// Default eviction order, most disposable first. Keys not listed here are
/// never auto-evicted.
pub fn default_eviction_priority() -> Vec<String> {
    vec![
        SESSION_RECORDINGS.to_string(),
        ANALYTICS_EVENTS.to_string(),
        SYSTEM_LOGS.to_string(),
        VISITOR_COUNTERS.to_string(),
        NEGOTIATION_DRAFTS.to_string(),
    ]
}
