use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::config::project_dirs;
use crate::domain::PersistedState;

fn data_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("desk.json"))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    let path = data_file()?;
    let data = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => {
            debug!(path = %path.display(), "restored saved settings");
            Some(state)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
