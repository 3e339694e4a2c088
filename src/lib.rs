//! Pomodoro - A command-line Pomodoro timer
//!
//! This library provides the persisted session record, the countdown logic and
//! the `start` / `stop` / `status` command handlers used by the `pomodoro` binary.

pub mod config;
pub mod error;
pub mod state;
pub mod cli;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Command, Config};
pub use error::{PomodoroError, StoreError};
pub use state::{AppState, PomodoroEvent, StateRecord};
pub use cli::{run_command, CommandOutcome};
pub use utils::signals::shutdown_signal;
