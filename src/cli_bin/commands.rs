//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::{Cli, Commands, ConvertArgs, InitArgs};
use anyhow::Context;
use hexo_source_tool::{ops, ConvertOptions, GitHistory, InitOptions, Layout, Report};
use log::debug;
use std::process::ExitCode;

/// What the process should do once a command has finished
#[derive(Debug)]
pub enum Outcome {
    Success,
    Failure(anyhow::Error),
}

impl Outcome {
    /// Print the final status line and pick the exit code
    pub fn finish(self) -> ExitCode {
        match self {
            Self::Success => {
                println!("OK");
                ExitCode::SUCCESS
            }
            Self::Failure(e) => {
                eprintln!("error - {:#}", e);
                ExitCode::FAILURE
            }
        }
    }
}

impl From<anyhow::Result<Report>> for Outcome {
    fn from(result: anyhow::Result<Report>) -> Self {
        match result {
            Ok(report) => {
                report.render();
                Self::Success
            }
            Err(e) => Self::Failure(e),
        }
    }
}

pub fn run(cli: Cli) -> Outcome {
    let layout = Layout {
        posts_dir: cli.posts_dir,
        ..Layout::default()
    };
    let result = match cli.command {
        Commands::Init(args) => init_command(args, layout),
        Commands::Convert(args) => convert_command(args, layout),
    };
    result.into()
}

/// Execute the init command
pub fn init_command(args: InitArgs, layout: Layout) -> anyhow::Result<Report> {
    debug!("Executing init command with args: {:?}", args);
    let options = InitOptions::new(&args.paths.source, &args.paths.destination)
        .force(args.paths.force)
        .layout(layout);
    ops::run_init(&options).with_context(|| {
        format!(
            "init {} -> {} failed",
            args.paths.source.display(),
            args.paths.destination.display()
        )
    })
}

/// Execute the convert command
pub fn convert_command(args: ConvertArgs, layout: Layout) -> anyhow::Result<Report> {
    debug!("Executing convert command with args: {:?}", args);
    let options = ConvertOptions::new(&args.paths.source, &args.paths.destination)
        .force(args.paths.force)
        .autofill(args.autofill)
        .layout(layout);
    let history = GitHistory::new();
    ops::run_convert(&options, &history).with_context(|| {
        format!(
            "convert {} -> {} failed",
            args.paths.source.display(),
            args.paths.destination.display()
        )
    })
}
