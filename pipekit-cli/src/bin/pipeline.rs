//! `pipeline` - BIDS-style analysis pipeline front end

use clap::FromArgMatches;
use pipekit_cli::pipeline_cmd::{self, PipelineCli};
use pipekit_cli::{exit, TermStyle};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = pipeline_cmd::command(TermStyle::for_stdout()).get_matches();
    let cli = match PipelineCli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    exit::finish(pipeline_cmd::run(cli), TermStyle::for_stderr())
}
