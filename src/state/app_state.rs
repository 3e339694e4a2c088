//! Per-process context shared by the command handlers and the completion task

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::{Countdown, PomodoroEvent, SessionPhase, StateRecord};
use crate::{error::PomodoroError, services::StateStore, tasks::CompletionTimer};

/// Everything protected by the session guard
#[derive(Debug, Default)]
pub struct Session {
    /// In-memory mirror of the state file, refreshed by every reload
    pub record: StateRecord,
    armed: Option<ArmedTimer>,
}

/// A completion timer together with the session it will end
#[derive(Debug)]
struct ArmedTimer {
    start_time: DateTime<Utc>,
    timer: CompletionTimer,
}

impl Session {
    /// Check if this process owns a pending completion for the current record
    pub fn has_armed_timer(&self) -> bool {
        self.armed.as_ref().is_some_and(|armed| {
            armed.start_time == self.record.start_time && !armed.timer.is_finished()
        })
    }

    fn cancel_timer(&mut self) {
        if let Some(mut armed) = self.armed.take() {
            armed.timer.cancel();
        }
    }
}

/// Application context constructed once per process
#[derive(Debug)]
pub struct AppState {
    store: StateStore,
    countdown: Countdown,
    /// Mutual-exclusion guard over the record mirror and all store access
    session: Mutex<Session>,
    /// Channel for user-facing notifications
    event_tx: broadcast::Sender<PomodoroEvent>,
}

impl AppState {
    /// Create a context for a standard 25-minute Pomodoro
    pub fn new(store: StateStore) -> Self {
        Self::with_countdown(store, Countdown::pomodoro())
    }

    pub fn with_countdown(store: StateStore, countdown: Countdown) -> Self {
        let (event_tx, _) = broadcast::channel(16);

        Self {
            store,
            countdown,
            session: Mutex::new(Session::default()),
            event_tx,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Subscribe to notifications
    pub fn subscribe(&self) -> broadcast::Receiver<PomodoroEvent> {
        self.event_tx.subscribe()
    }

    /// Acquire the session guard
    pub fn lock(&self) -> Result<MutexGuard<'_, Session>, PomodoroError> {
        self.session
            .lock()
            .map_err(|e| PomodoroError::LockPoisoned(e.to_string()))
    }

    fn emit(&self, event: PomodoroEvent) {
        if let Err(e) = self.event_tx.send(event) {
            debug!("No listener for notification: {}", e.0);
        }
    }

    /// Refresh the mirror from disk and reconcile it with the clock.
    ///
    /// An expired record is closed and persisted, reported as `Idle`. A live
    /// record gets a completion timer if this process does not own one yet.
    pub fn reload(self: &Arc<Self>, session: &mut Session, now: DateTime<Utc>) -> SessionPhase {
        session.record = match self.store.load() {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to load state, falling back to idle: {}", e);
                self.emit(PomodoroEvent::StateLoadFailed(e.to_string()));
                StateRecord::idle()
            }
        };

        match self.countdown.phase(&session.record, now) {
            SessionPhase::Idle => {
                session.cancel_timer();
                SessionPhase::Idle
            }
            SessionPhase::Expired => {
                info!("Session started at {} ran out, closing it", session.record.start_time);
                session.cancel_timer();
                session.record.deactivate();
                self.persist(session);
                self.emit(PomodoroEvent::AlreadyFinished);
                SessionPhase::Idle
            }
            SessionPhase::Running { remaining } => {
                if !session.has_armed_timer() {
                    self.arm(session, remaining);
                }
                SessionPhase::Running { remaining }
            }
        }
    }

    /// Write the mirror to disk; failures are reported and otherwise ignored
    pub fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(&session.record) {
            error!("Failed to persist state: {}", e);
            self.emit(PomodoroEvent::StateSaveFailed(e.to_string()));
        }
    }

    /// Start a fresh session at `now` and arm its completion
    pub fn begin(self: &Arc<Self>, session: &mut Session, now: DateTime<Utc>) {
        session.cancel_timer();
        session.record = StateRecord::started(now);
        self.persist(session);
        self.arm(session, self.countdown.length());
    }

    /// Close the current session early, cancelling its pending completion
    pub fn end(&self, session: &mut Session) {
        session.cancel_timer();
        session.record.deactivate();
        self.persist(session);
    }

    fn arm(self: &Arc<Self>, session: &mut Session, remaining: Duration) {
        let start_time = session.record.start_time;
        let delay = remaining.to_std().unwrap_or_default();
        let app: Weak<Self> = Arc::downgrade(self);

        let timer = CompletionTimer::schedule(delay, move || {
            if let Some(app) = app.upgrade() {
                app.complete_session(start_time);
            }
        });

        session.cancel_timer();
        session.armed = Some(ArmedTimer { start_time, timer });
    }

    /// Completion callback: close the session that began at `armed_for`.
    ///
    /// The file is re-read first, so a session stopped or replaced by another
    /// invocation is left alone.
    fn complete_session(&self, armed_for: DateTime<Utc>) {
        let mut session = match self.lock() {
            Ok(session) => session,
            Err(e) => {
                error!("Completion could not acquire session guard: {}", e);
                return;
            }
        };

        if session.armed.as_ref().is_some_and(|armed| armed.start_time == armed_for) {
            session.armed = None;
        }

        // Without a readable file the cached copy is the only record of the session.
        match self.store.load_existing() {
            Ok(Some(record)) => session.record = record,
            Ok(None) => debug!("No state file on completion, using cached copy"),
            Err(e) => warn!("Failed to reload state on completion, using cached copy: {}", e),
        }

        if !session.record.is_active() || session.record.start_time != armed_for {
            debug!("Completion for session {} is stale, ignoring", armed_for);
            return;
        }

        session.record.deactivate();
        self.persist(&session);

        info!("Pomodoro that started at {} finished", armed_for);
        // Queued before the guard is released so a reload never sees the
        // closed session without its notification.
        self.emit(PomodoroEvent::Finished);
    }
}
