//! Command dispatch module
//!
//! This module contains the verb handlers and the outcomes they print.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use crate::{config::Command, error::PomodoroError, state::AppState};
pub use handlers::*;
pub use responses::CommandOutcome;

/// Run one verb against the shared context
pub fn run_command(state: &Arc<AppState>, command: Command) -> Result<CommandOutcome, PomodoroError> {
    match command {
        Command::Start { .. } => start_handler(state),
        Command::Stop => stop_handler(state),
        Command::Status => status_handler(state),
    }
}
