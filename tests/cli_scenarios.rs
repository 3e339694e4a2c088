//! End-to-end scenarios for the three verbs.
//!
//! Each test drives the command handlers against a state file in its own temp
//! directory. A fresh `AppState` over the same file stands in for a separate
//! invocation of the binary.

use std::{fs, path::Path, sync::Arc};

use chrono::{Duration, Utc};
use pomodoro::{
    cli::{start_handler, status_handler, stop_handler},
    run_command,
    services::{StateStore, STATE_FILE_NAME},
    state::{AppState, PomodoroEvent, StateRecord},
    Command, CommandOutcome,
};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A new per-process context over the state file in `dir`
fn invocation(dir: &Path) -> Arc<AppState> {
    Arc::new(AppState::new(StateStore::new(dir.join(STATE_FILE_NAME))))
}

fn read_record(dir: &Path) -> StateRecord {
    StateStore::new(dir.join(STATE_FILE_NAME))
        .load()
        .expect("Failed to load state file")
}

fn write_record(dir: &Path, record: &StateRecord) {
    StateStore::new(dir.join(STATE_FILE_NAME))
        .save(record)
        .expect("Failed to write state file");
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn status_without_state_file_reports_idle() {
    let dir = create_test_dir();

    let outcome = status_handler(&invocation(dir.path())).unwrap();

    assert_eq!(outcome, CommandOutcome::NoActiveSession);
    assert_eq!(outcome.to_string(), "No active Pomodoro.");
    assert!(!dir.path().join(STATE_FILE_NAME).exists());
}

#[tokio::test]
async fn start_then_status_reports_about_25_minutes() {
    let dir = create_test_dir();

    let started = start_handler(&invocation(dir.path())).unwrap();
    assert_eq!(started.to_string(), "Starting a new Pomodoro: 25 minutes");
    assert!(read_record(dir.path()).is_active());

    let outcome = status_handler(&invocation(dir.path())).unwrap();
    match outcome {
        CommandOutcome::Running { remaining } => {
            assert!(remaining <= Duration::minutes(25));
            assert!(remaining > Duration::minutes(24));
        }
        other => panic!("expected a running session, got {:?}", other),
    }
    assert!(outcome.to_string().starts_with("Pomodoro running: "));
    assert!(outcome.to_string().ends_with(" minutes remaining"));
}

#[tokio::test]
async fn status_after_session_ran_out_closes_it() {
    let dir = create_test_dir();
    start_handler(&invocation(dir.path())).unwrap();

    // Backdate the session as if 26 minutes had passed.
    let backdated = StateRecord::started(Utc::now() - Duration::minutes(26));
    write_record(dir.path(), &backdated);

    let app = invocation(dir.path());
    let mut events = app.subscribe();
    let outcome = status_handler(&app).unwrap();

    assert_eq!(outcome, CommandOutcome::NoActiveSession);
    assert_eq!(events.try_recv().unwrap(), PomodoroEvent::AlreadyFinished);

    let on_disk = read_record(dir.path());
    assert!(!on_disk.is_active());
    assert_eq!(on_disk.start_time, backdated.start_time);
}

#[tokio::test]
async fn start_then_stop_then_status() {
    let dir = create_test_dir();
    let app = invocation(dir.path());

    start_handler(&app).unwrap();
    let stopped = stop_handler(&app).unwrap();
    assert_eq!(stopped.to_string(), "Pomodoro stopped.");

    let outcome = status_handler(&invocation(dir.path())).unwrap();
    assert_eq!(outcome, CommandOutcome::NoActiveSession);
}

#[tokio::test]
async fn second_start_is_rejected_and_keeps_start_time() {
    let dir = create_test_dir();

    start_handler(&invocation(dir.path())).unwrap();
    let first = read_record(dir.path());

    let outcome = start_handler(&invocation(dir.path())).unwrap();
    assert_eq!(outcome.to_string(), "Pomodoro already running!");
    assert_eq!(read_record(dir.path()), first);
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn stop_twice_is_idempotent() {
    let dir = create_test_dir();
    let app = invocation(dir.path());

    start_handler(&app).unwrap();
    assert_eq!(stop_handler(&app).unwrap(), CommandOutcome::Stopped);
    let after_first = read_record(dir.path());

    let second = stop_handler(&app).unwrap();
    assert_eq!(second.to_string(), "No active Pomodoro to stop.");
    assert_eq!(read_record(dir.path()), after_first);
}

#[tokio::test]
async fn stop_from_a_different_invocation_clears_the_session() {
    let dir = create_test_dir();

    start_handler(&invocation(dir.path())).unwrap();
    let outcome = stop_handler(&invocation(dir.path())).unwrap();

    assert_eq!(outcome, CommandOutcome::Stopped);
    assert!(!read_record(dir.path()).is_active());
}

#[tokio::test]
async fn start_after_stop_begins_a_fresh_session() {
    let dir = create_test_dir();
    let app = invocation(dir.path());

    start_handler(&app).unwrap();
    let first = read_record(dir.path());
    stop_handler(&app).unwrap();

    let outcome = start_handler(&app).unwrap();
    assert!(matches!(outcome, CommandOutcome::Started { .. }));

    let second = read_record(dir.path());
    assert!(second.is_active());
    assert!(second.start_time >= first.start_time);
}

#[tokio::test]
async fn start_replaces_an_expired_session() {
    let dir = create_test_dir();
    write_record(
        dir.path(),
        &StateRecord::started(Utc::now() - Duration::hours(3)),
    );

    let app = invocation(dir.path());
    let mut events = app.subscribe();
    let outcome = start_handler(&app).unwrap();

    assert!(matches!(outcome, CommandOutcome::Started { .. }));
    assert_eq!(events.try_recv().unwrap(), PomodoroEvent::AlreadyFinished);
    let record = read_record(dir.path());
    assert!(record.is_active());
    assert!(Utc::now() - record.start_time < Duration::minutes(1));
}

#[tokio::test]
async fn malformed_state_file_is_reported_and_command_continues() {
    let dir = create_test_dir();
    fs::write(dir.path().join(STATE_FILE_NAME), "Active=yes").unwrap();

    let app = invocation(dir.path());
    let mut events = app.subscribe();
    let outcome = status_handler(&app).unwrap();

    assert_eq!(outcome, CommandOutcome::NoActiveSession);
    match events.try_recv().unwrap() {
        PomodoroEvent::StateLoadFailed(message) => assert!(message.contains("malformed")),
        other => panic!("expected a load diagnostic, got {:?}", other),
    }
}

#[tokio::test]
async fn unwritable_state_file_is_reported_and_start_still_succeeds() {
    let dir = create_test_dir();
    let store = StateStore::new(dir.path().join("missing").join(STATE_FILE_NAME));
    let app = Arc::new(AppState::new(store));
    let mut events = app.subscribe();

    let outcome = start_handler(&app).unwrap();

    assert!(matches!(outcome, CommandOutcome::Started { .. }));
    assert!(matches!(
        events.try_recv().unwrap(),
        PomodoroEvent::StateSaveFailed(_)
    ));
    assert!(app.lock().unwrap().record.is_active());
}

#[tokio::test]
async fn reads_state_written_by_the_legacy_tool() {
    let dir = create_test_dir();
    let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
    let start = (Utc::now() - Duration::minutes(5)).with_timezone(&offset);
    fs::write(
        dir.path().join(STATE_FILE_NAME),
        format!(
            "{{\"Active\":true,\"StartTime\":\"{}\"}}\n",
            start.to_rfc3339_opts(chrono::SecondsFormat::Nanos, false)
        ),
    )
    .unwrap();

    match run_command(&invocation(dir.path()), Command::Status).unwrap() {
        CommandOutcome::Running { remaining } => {
            assert!(remaining <= Duration::minutes(20));
            assert!(remaining > Duration::minutes(19));
        }
        other => panic!("expected a running session, got {:?}", other),
    }
}
