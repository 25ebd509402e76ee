//! `qdl clear` command - reset the ledger

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::open_session;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global);
    let count = session.ledger.len();

    if count == 0 {
        if !global.quiet {
            println!("Ledger is already empty.");
        }
        return Ok(());
    }

    // Confirm if not --yes
    if !args.yes {
        print!(
            "This removes all {} record(s) from {}. Proceed? [y/N] ",
            count,
            session.data_path().display()
        );
        std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).into_diagnostic()?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    session.ledger.reset();
    session.flush().map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Cleared {} record(s) from {}",
            style("✓").green(),
            style(count).cyan(),
            style(session.data_path().display()).dim()
        );
    }

    Ok(())
}
