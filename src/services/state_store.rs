//! File-backed storage for the session record

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{error::StoreError, state::StateRecord};

/// File name of the state document inside the system temp directory
pub const STATE_FILE_NAME: &str = "pomodoro_state.json";

/// Reads and writes the state record as a small JSON document at a fixed path
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by an arbitrary file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The well-known location shared by every invocation
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(STATE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record; a missing file means a session was never started
    pub fn load(&self) -> Result<StateRecord, StoreError> {
        Ok(self.load_existing()?.unwrap_or_default())
    }

    /// Load the record, or `None` when no file has been written yet
    pub fn load_existing(&self) -> Result<Option<StateRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrite the file with `record`
    pub fn save(&self, record: &StateRecord) -> Result<(), StoreError> {
        let mut document = serde_json::to_string(record).map_err(StoreError::Encode)?;
        document.push('\n');

        fs::write(&self.path, document).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved state to {}: active={}", self.path.display(), record.active);
        Ok(())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
