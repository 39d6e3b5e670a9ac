mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command, cli.config.as_deref())
}

fn dispatch(command: Commands, config: Option<&std::path::Path>) -> Result<()> {
    match command {
        Commands::Resolve {
            input,
            pretty,
            stats,
        } => cli::resolve::run(&input, config, pretty, stats),
        Commands::Normalize { aliases } => cli::normalize::run(config, &aliases),
        Commands::Role { aliases } => cli::role::run(config, &aliases),
        Commands::Config => cli::config::run(config),
    }
}
