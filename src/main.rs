//! Pomodoro - A command-line Pomodoro timer
//!
//! This is the main entry point for the pomodoro binary.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use pomodoro::{
    config::Config,
    run_command,
    services::StateStore,
    shutdown_signal,
    state::{AppState, PomodoroEvent},
    tasks::{wait_for_session_end, WaitOutcome, POLL_INTERVAL},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the command's result
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let store = StateStore::default();
    debug!("Using state file {}", store.path().display());

    let state = Arc::new(AppState::new(store));
    let mut events = state.subscribe();

    let outcome = run_command(&state, config.command);
    print_pending(&mut events);

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    println!("{}", outcome);

    if config.wait_for_completion() && outcome.session_running() {
        let shutdown = async {
            if let Err(e) = shutdown_signal().await {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        let waited = wait_for_session_end(
            Arc::clone(&state),
            events,
            POLL_INTERVAL,
            shutdown,
            |event| println!("{}", event),
        )
        .await;

        match waited {
            WaitOutcome::Finished => println!("{}", PomodoroEvent::Finished),
            WaitOutcome::EndedElsewhere => println!("Pomodoro is no longer running."),
            WaitOutcome::Interrupted => {
                println!("Stopped waiting; the Pomodoro is still running.")
            }
        }
    }

    Ok(())
}

/// Print notifications raised while the command ran
fn print_pending(events: &mut broadcast::Receiver<PomodoroEvent>) {
    while let Ok(event) = events.try_recv() {
        println!("{}", event);
    }
}
