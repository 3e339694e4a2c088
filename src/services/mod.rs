//! External resource module
//!
//! The only resource outside the process is the state file shared by every invocation.

pub mod state_store;

// Re-export main types
pub use state_store::{StateStore, STATE_FILE_NAME};
