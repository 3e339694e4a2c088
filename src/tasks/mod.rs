//! Background tasks module
//!
//! This module contains the one-shot timer that ends a session from inside the
//! process, and the foreground wait built on top of it.

pub mod completion_timer;
pub mod session_watch;

// Re-export main types
pub use completion_timer::CompletionTimer;
pub use session_watch::{wait_for_session_end, WaitOutcome, POLL_INTERVAL};
