use clap::Parser;
use inkfield::cli::{run, Cli};
use inkfield::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(level)?;

    run(cli)
}
