use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod consensus;
mod core;
mod parsing;
mod report;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("consensus_reporter=debug,info")
    } else {
        EnvFilter::new("consensus_reporter=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Report(args) => {
            cli::report::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Types(args) => {
            cli::types::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Normalize(args) => {
            cli::normalize::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
