use clap::Parser;
use std::process::ExitCode;

mod cli_bin;

use cli_bin::args::Cli;
use cli_bin::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    commands::run(cli).finish()
}
