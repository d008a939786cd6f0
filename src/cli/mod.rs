use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kote-stats",
    about = "Regenerate the solved-problem stats table in a profile README"
)]
pub struct Cli {
    /// Directory containing the repository checkouts to scan.
    #[arg(long, default_value = "repos")]
    pub root: PathBuf,

    /// Markdown file whose sentinel block is rewritten.
    #[arg(long, default_value = "profile/README.md")]
    pub readme: PathBuf,

    /// JSON file overriding the scan settings (solutions dirnames,
    /// extension filter, known extensions).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip git history queries; today counts and commit dates stay empty.
    #[arg(long)]
    pub no_git: bool,

    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan repositories and rewrite the README block (default).
    Update,
    /// Print the rendered table to stdout without touching the README.
    Render,
    /// Create the skeleton README and the repos root, then exit.
    Init,
}

/// Parse CLI arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}
