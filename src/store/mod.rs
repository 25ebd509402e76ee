//! Persistence gateway - workbook and history-file I/O
//!
//! The gateway is deliberately dumb: it reads and writes the two files the
//! original tool used (`engineering_data.xlsx` and `input_history.json`)
//! and reports failures without ever discarding in-memory state.

pub mod history_file;
pub mod workbook;

use std::path::PathBuf;
use thiserror::Error;

pub use history_file::{load_history, save_history};
pub use workbook::{load_ledger, save_ledger, COLUMNS, SHEET_NAME};

/// Errors from the persistence gateway.
///
/// Schema variants mean the file on disk does not look like a ledger
/// workbook; the caller degrades to an empty ledger and leaves the file
/// untouched. I/O variants are retryable.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("could not read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("could not write {path}: {message}")]
    Write { path: PathBuf, message: String },
}
