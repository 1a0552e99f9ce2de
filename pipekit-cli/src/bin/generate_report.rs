//! `generate-report` - portable HTML report generator

use clap::FromArgMatches;
use pipekit_cli::report_cmd::{self, ReportCli};
use pipekit_cli::{exit, logging, TermStyle};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_style = TermStyle::for_stdout();
    let matches = report_cmd::command(stdout_style).get_matches();
    let cli = match ReportCli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    logging::init(cli.verbose);
    let generated_at = chrono::Local::now().naive_local();
    exit::finish(
        report_cmd::run(cli, stdout_style, generated_at),
        TermStyle::for_stderr(),
    )
}
