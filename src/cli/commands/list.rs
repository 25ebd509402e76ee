//! `qdl list` command - the grouped ledger table

use miette::{IntoDiagnostic, Result};

use crate::cli::commands::open_session;
use crate::cli::{table, GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short = 'o', default_value = "auto")]
    pub format: OutputFormat,

    /// Wrap the note and date columns at this width (terminal format only)
    #[arg(long, value_name = "WIDTH")]
    pub wrap: Option<usize>,

    /// Show only the record count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global);
    let view = session.ledger.grouped_view();

    if args.count {
        println!("{}", view.len());
        return Ok(());
    }

    if view.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    let format = if args.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        args.format
    };

    match format {
        OutputFormat::Tsv => table::render_tsv(&view, args.wrap),
        OutputFormat::Csv => table::render_csv(&view),
        OutputFormat::Md => table::render_md(&view),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
