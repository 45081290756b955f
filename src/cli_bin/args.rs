//! Command-line argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "hexo-source-tool",
    version,
    about = "a tool for reorganizing hexo/source/ directory",
    long_about = "hexo-source-tool moves the front matter of hexo posts and pages into a \
                  single headers.json (init) and writes it back into each file (convert)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Name of the posts subdirectory
    #[arg(long, global = true, default_value = "_posts", value_name = "DIR")]
    pub posts_dir: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize original hexo/source to the custom architecture
    Init(InitArgs),
    /// Convert to original hexo/source from the custom architecture
    Convert(ConvertArgs),
}

/// Source and destination shared by both commands
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// The directory to read from
    #[arg(short, long, value_name = "DIR")]
    pub source: PathBuf,

    /// The directory to write into
    #[arg(short, long, value_name = "DIR")]
    pub destination: PathBuf,

    /// If set, a non-empty destination directory will be covered
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub paths: PathArgs,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Fill missing title, date, updated and description fields from the
    /// file name, body and git history; use --autofill=false to disable
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        value_name = "BOOL"
    )]
    pub autofill: bool,
}
