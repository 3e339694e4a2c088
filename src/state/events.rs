//! Notifications emitted while commands run

use std::fmt;

/// Something the user should hear about besides the command's own result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PomodoroEvent {
    /// The in-process completion timer ended the session
    Finished,
    /// A load found a session past its end and closed it
    AlreadyFinished,
    StateLoadFailed(String),
    StateSaveFailed(String),
}

impl fmt::Display for PomodoroEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => write!(f, "Pomodoro finished!"),
            Self::AlreadyFinished => write!(f, "Pomodoro already finished!"),
            Self::StateLoadFailed(e) => write!(f, "Error loading state: {}", e),
            Self::StateSaveFailed(e) => write!(f, "Error saving state: {}", e),
        }
    }
}
