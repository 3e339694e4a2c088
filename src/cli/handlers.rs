//! Handlers for the `start`, `stop` and `status` verbs
//!
//! Each handler takes the session guard, reloads the record from disk, applies
//! its verb and persists any change before the guard is released. Handlers must
//! run inside a Tokio runtime since a live session arms a completion task.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info};

use super::responses::CommandOutcome;
use crate::{
    error::PomodoroError,
    state::{AppState, SessionPhase},
};

/// Handle `start` - Begin a session unless one is already running
pub fn start_handler(state: &Arc<AppState>) -> Result<CommandOutcome, PomodoroError> {
    let mut session = state.lock()?;
    let now = Utc::now();

    if let SessionPhase::Running { remaining } = state.reload(&mut session, now) {
        debug!("Start rejected, {} seconds remain", remaining.num_seconds());
        return Ok(CommandOutcome::AlreadyRunning);
    }

    state.begin(&mut session, now);
    info!("Started a new Pomodoro at {}", now);

    Ok(CommandOutcome::Started {
        length: state.countdown().length(),
    })
}

/// Handle `stop` - End the running session early
pub fn stop_handler(state: &Arc<AppState>) -> Result<CommandOutcome, PomodoroError> {
    let mut session = state.lock()?;

    if state.reload(&mut session, Utc::now()) == SessionPhase::Idle {
        return Ok(CommandOutcome::NothingToStop);
    }

    state.end(&mut session);
    info!("Stopped the Pomodoro that started at {}", session.record.start_time);

    Ok(CommandOutcome::Stopped)
}

/// Handle `status` - Report the time left in the running session
pub fn status_handler(state: &Arc<AppState>) -> Result<CommandOutcome, PomodoroError> {
    let mut session = state.lock()?;

    match state.reload(&mut session, Utc::now()) {
        SessionPhase::Running { remaining } => Ok(CommandOutcome::Running { remaining }),
        SessionPhase::Idle | SessionPhase::Expired => Ok(CommandOutcome::NoActiveSession),
    }
}
