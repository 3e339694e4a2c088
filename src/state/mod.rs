//! State management module
//!
//! This module contains the persisted record, the countdown math and the
//! per-process context that guards them.

pub mod state_record;
pub mod countdown;
pub mod events;
pub mod app_state;

// Re-export main types
pub use state_record::StateRecord;
pub use countdown::{Countdown, SessionPhase};
pub use events::PomodoroEvent;
pub use app_state::{AppState, Session};
