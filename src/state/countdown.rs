//! Countdown arithmetic for a single session

use chrono::{DateTime, Duration, Utc};

use super::StateRecord;

/// Length of a Pomodoro in minutes
pub const POMODORO_MINUTES: i64 = 25;

/// Where a loaded record stands relative to `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running { remaining: Duration },
    /// Still flagged active on disk but past its end
    Expired,
}

/// Fixed-length countdown measured from a record's start time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    length: Duration,
}

impl Countdown {
    /// Create a countdown of arbitrary length
    pub fn new(length: Duration) -> Self {
        Self { length }
    }

    /// The standard 25-minute Pomodoro
    pub fn pomodoro() -> Self {
        Self::new(Duration::minutes(POMODORO_MINUTES))
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    /// `length - (now - start_time)`; negative once the session is over
    pub fn remaining(&self, record: &StateRecord, now: DateTime<Utc>) -> Duration {
        self.length - (now - record.start_time)
    }

    pub fn is_expired(&self, record: &StateRecord, now: DateTime<Utc>) -> bool {
        self.remaining(record, now) <= Duration::zero()
    }

    /// Classify a record, treating the inactive flag as authoritative
    pub fn phase(&self, record: &StateRecord, now: DateTime<Utc>) -> SessionPhase {
        if !record.is_active() {
            return SessionPhase::Idle;
        }

        let remaining = self.remaining(record, now);
        if remaining <= Duration::zero() {
            SessionPhase::Expired
        } else {
            SessionPhase::Running { remaining }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::pomodoro()
    }
}

/// Express a duration in fractional minutes
pub fn as_minutes(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 60_000.0
}
