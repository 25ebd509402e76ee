//! Core module - the ledger, history store, and session lifecycle

pub mod config;
pub mod history;
pub mod ledger;
pub mod record;
pub mod session;

pub use config::Config;
pub use history::{HistoryField, HistoryStore};
pub use ledger::{parse_count, Ledger, LedgerError, Submission};
pub use record::{DefectRecord, NOTE_ADDED_MARKER, TIMESTAMP_FORMAT, TYPE_PLACEHOLDER};
pub use session::Session;
