//! `qdl export` command - write the workbook and history to disk

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::open_session;
use crate::cli::GlobalOpts;
use crate::store;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Write the workbook to this path instead of the configured data file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global);

    let target = match args.output {
        Some(path) => {
            store::save_ledger(&session.ledger, &path).map_err(|e| miette::miette!("{}", e))?;
            path
        }
        None => {
            session.flush().map_err(|e| miette::miette!("{}", e))?;
            session.data_path().to_path_buf()
        }
    };

    if !global.quiet {
        println!(
            "{} Exported {} record(s) to {}",
            style("✓").green(),
            style(session.ledger.len()).cyan(),
            style(target.display()).dim()
        );
    }

    Ok(())
}
