//! Deterministic object keys, shared with the out-of-band processor.

use chrono::{DateTime, Utc};
use ripple_core::UserId;

pub const QUEUE_STATE_KEY: &str = "queue/state.json";

pub fn recommendations_key(user_id: UserId) -> String {
    format!("recommendations/user-{}.json", user_id)
}

pub fn analysis_key(user_id: UserId) -> String {
    format!("analysis/user-{}/latest.json", user_id)
}

/// Daily log file, one per UTC date.
pub fn processing_log_key(now: DateTime<Utc>) -> String {
    format!("logs/{}.json", now.format("%Y-%m-%d"))
}
