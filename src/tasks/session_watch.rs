//! Foreground wait used by `start --wait`

use std::{future::Future, sync::Arc, time::Duration};
use chrono::Utc;
use tokio::{sync::broadcast, time::interval};
use tracing::{debug, info, warn};

use crate::state::{AppState, PomodoroEvent, SessionPhase};

/// How often the state file is re-checked while waiting
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Why the foreground wait returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The completion timer in this process ended the session
    Finished,
    /// The session was stopped or closed by another invocation
    EndedElsewhere,
    /// A signal arrived; the session keeps running on disk
    Interrupted,
}

/// Block until the running session ends or `shutdown` resolves.
///
/// Notifications other than `Finished` are passed to `on_event` as they arrive.
/// The state file is polled every `poll` so that a `stop` issued from another
/// shell also ends the wait.
pub async fn wait_for_session_end<S, F>(
    state: Arc<AppState>,
    mut events: broadcast::Receiver<PomodoroEvent>,
    poll: Duration,
    shutdown: S,
    mut on_event: F,
) -> WaitOutcome
where
    S: Future<Output = ()>,
    F: FnMut(&PomodoroEvent),
{
    info!("Waiting in the foreground for the Pomodoro to finish");
    tokio::pin!(shutdown);

    let mut ticker = interval(poll);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PomodoroEvent::Finished) => return WaitOutcome::Finished,
                Ok(other) => on_event(&other),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Missed {} notifications", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return WaitOutcome::EndedElsewhere,
            },

            _ = ticker.tick() => {
                let phase = match state.lock() {
                    Ok(mut session) => state.reload(&mut session, Utc::now()),
                    Err(e) => {
                        warn!("Failed to check session while waiting: {}", e);
                        continue;
                    }
                };

                if phase == SessionPhase::Idle {
                    // A completion that fired during the reload is already queued.
                    while let Ok(event) = events.try_recv() {
                        if event == PomodoroEvent::Finished {
                            return WaitOutcome::Finished;
                        }
                        on_event(&event);
                    }
                    debug!("Session no longer active on disk");
                    return WaitOutcome::EndedElsewhere;
                }
            }

            _ = &mut shutdown => return WaitOutcome::Interrupted,
        }
    }
}
