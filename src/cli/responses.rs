//! Command outcome structures

use std::fmt;
use chrono::Duration;

use crate::state::countdown::as_minutes;

/// Result of running one verb, rendered as the line printed on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `start` began a session of the given length
    Started { length: Duration },
    AlreadyRunning,
    Stopped,
    NothingToStop,
    Running { remaining: Duration },
    NoActiveSession,
}

impl CommandOutcome {
    /// Check if a session is running once the command is done
    pub fn session_running(&self) -> bool {
        matches!(
            self,
            Self::Started { .. } | Self::AlreadyRunning | Self::Running { .. }
        )
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { length } => {
                write!(f, "Starting a new Pomodoro: {} minutes", length.num_minutes())
            }
            Self::AlreadyRunning => write!(f, "Pomodoro already running!"),
            Self::Stopped => write!(f, "Pomodoro stopped."),
            Self::NothingToStop => write!(f, "No active Pomodoro to stop."),
            Self::Running { remaining } => write!(
                f,
                "Pomodoro running: {:.2} minutes remaining",
                as_minutes(*remaining)
            ),
            Self::NoActiveSession => write!(f, "No active Pomodoro."),
        }
    }
}
