use clap::Parser;
use miette::Result;
use qdl::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Add(args) => qdl::cli::commands::add::run(args, &global),
        Commands::List(args) => qdl::cli::commands::list::run(args, &global),
        Commands::Export(args) => qdl::cli::commands::export::run(args, &global),
        Commands::Clear(args) => qdl::cli::commands::clear::run(args, &global),
        Commands::History(args) => qdl::cli::commands::history::run(args, &global),
        Commands::Completions(args) => qdl::cli::commands::completions::run(args),
    }
}
