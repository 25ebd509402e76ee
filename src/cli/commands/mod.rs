//! Command implementations

pub mod add;
pub mod clear;
pub mod completions;
pub mod export;
pub mod history;
pub mod list;

use console::style;

use crate::cli::GlobalOpts;
use crate::core::{Config, Session};

/// Open the session for a command.
///
/// Path resolution order: flags, then env/global config, then the original
/// tool's working-directory defaults. Degraded-load warnings go to stderr;
/// the command still runs against the empty fallback structures.
pub fn open_session(global: &GlobalOpts) -> Session {
    let config = Config::load();
    let data_path = global
        .data_file
        .clone()
        .unwrap_or_else(|| config.data_file());
    let history_path = global
        .history_file
        .clone()
        .unwrap_or_else(|| config.history_file());

    let session = Session::open(data_path, history_path);
    for warning in session.warnings() {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }
    session
}
