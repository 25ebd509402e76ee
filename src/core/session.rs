//! Session lifecycle - one ledger + history pair per running command
//!
//! The original tool kept the ledger and history as window-level state,
//! loaded at startup and flushed at shutdown. Here that becomes an explicit
//! context object: construct with [`Session::open`], mutate, then
//! [`Session::flush`].

use std::path::{Path, PathBuf};

use crate::core::{HistoryStore, Ledger};
use crate::store::{self, StoreError};

/// Process-wide mutable state for one invocation: the ledger, the
/// autocomplete history, and the paths they round-trip through.
#[derive(Debug)]
pub struct Session {
    pub ledger: Ledger,
    pub history: HistoryStore,
    data_path: PathBuf,
    history_path: PathBuf,
    warnings: Vec<String>,
}

impl Session {
    /// Open a session from the two data files.
    ///
    /// Never fails: a missing file starts empty, and a corrupt or
    /// schema-mismatched file degrades to an empty structure with a
    /// warning, leaving the file on disk untouched.
    pub fn open(data_path: PathBuf, history_path: PathBuf) -> Self {
        let mut warnings = Vec::new();

        let ledger = match store::load_ledger(&data_path) {
            Ok(ledger) => ledger,
            Err(e) => {
                warnings.push(format!("{e}; starting with an empty ledger"));
                Ledger::new()
            }
        };

        let history = match store::load_history(&history_path) {
            Ok(history) => history,
            Err(e) => {
                warnings.push(format!("{e}; starting with an empty input history"));
                HistoryStore::new()
            }
        };

        Self {
            ledger,
            history,
            data_path,
            history_path,
            warnings,
        }
    }

    /// Warnings collected during a degraded open
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Write the ledger workbook and the history side file.
    ///
    /// On failure the in-memory state is left intact so the caller can
    /// retry (with the error surfaced to the user).
    pub fn flush(&self) -> Result<(), StoreError> {
        store::save_ledger(&self.ledger, &self.data_path)?;
        store::save_history(&self.history, &self.history_path)
    }
}
