//! `qdl history` command - dump the autocomplete suggestion sequences

use console::style;
use miette::Result;

use crate::cli::commands::open_session;
use crate::cli::GlobalOpts;
use crate::core::HistoryField;

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Which field to show: ids, details, or areas (all when omitted)
    pub field: Option<String>,
}

pub fn run(args: HistoryArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global);

    match args.field {
        Some(name) => {
            let field: HistoryField = name.parse().map_err(|e| miette::miette!("{}", e))?;
            for value in session.history.suggestions(field) {
                println!("{}", value);
            }
        }
        None => {
            for field in [HistoryField::Ids, HistoryField::Details, HistoryField::Areas] {
                println!("{}", style(field).bold());
                for value in session.history.suggestions(field) {
                    println!("  {}", value);
                }
            }
        }
    }

    Ok(())
}
