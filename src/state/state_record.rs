//! Persisted session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only persisted entity: whether a Pomodoro is running and when it began.
///
/// `start_time` is meaningful only while `active` is true; an inactive record
/// may carry the start of an old session and must not be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateRecord {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub start_time: DateTime<Utc>,
}

impl StateRecord {
    /// Create an idle record, the "never started" steady state
    pub fn idle() -> Self {
        Self::default()
    }

    /// Create an active record for a session beginning at `start_time`
    pub fn started(start_time: DateTime<Utc>) -> Self {
        Self {
            active: true,
            start_time,
        }
    }

    /// Check if a session is running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the session as over, keeping the stale start time
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
