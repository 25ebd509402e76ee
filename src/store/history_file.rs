//! Input-history side file (`input_history.json`)

use std::fs;
use std::path::Path;

use crate::core::HistoryStore;
use crate::store::StoreError;

/// Load the history store from its JSON side file.
///
/// A missing file is an empty store; an unreadable or corrupt file is an
/// error the caller degrades from (empty history plus a warning).
pub fn load_history(path: &Path) -> Result<HistoryStore, StoreError> {
    if !path.exists() {
        return Ok(HistoryStore::new());
    }

    let content = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the history store as JSON
pub fn save_history(history: &HistoryStore, path: &Path) -> Result<(), StoreError> {
    let write_err = |message: String| StoreError::Write {
        path: path.to_path_buf(),
        message,
    };

    let content = serde_json::to_string_pretty(history).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, content).map_err(|e| write_err(e.to_string()))
}
