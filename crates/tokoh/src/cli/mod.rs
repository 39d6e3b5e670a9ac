pub mod config;
pub mod normalize;
pub mod resolve;
pub mod role;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokoh_core::ResolverConfig;

#[derive(Parser)]
#[command(
    name = "tokoh",
    about = "Resolve character aliases in Indonesian folk stories",
    version
)]
pub struct Cli {
    /// JSON file overriding the built-in tables
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a JSON mention stream into canonical characters
    Resolve {
        /// Mentions file ('-' reads stdin)
        input: PathBuf,
        /// Pretty-print the output
        #[arg(short = 'p', long)]
        pretty: bool,
        /// Print per-story counts to stderr
        #[arg(short = 's', long)]
        stats: bool,
    },
    /// Show the canonical form of aliases
    Normalize {
        /// Raw surface forms
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Show the role each alias maps to
    Role {
        /// Aliases to look up
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Print the effective configuration as JSON
    Config,
}

/// Built-in tables, or the ones in `path` layered over them.
pub fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ResolverConfig::default()),
    }
}
