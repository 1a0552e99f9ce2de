//! Mapping command results to process exit status
//!
//! 0 on success, 1 on error, 130 when the run was interrupted. clap handles
//! its own usage errors (status 2) before any of this runs.

use crate::style::TermStyle;
use std::io;
use std::process::ExitCode;

pub const FAILURE: u8 = 1;
pub const INTERRUPTED: u8 = 130;

/// True if any error in the chain is an interrupted I/O operation
pub fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
    })
}

pub fn exit_status(err: &anyhow::Error) -> u8 {
    if is_interrupt(err) {
        INTERRUPTED
    } else {
        FAILURE
    }
}

/// Print the failure (if any) on stderr and return the exit code
pub fn finish(result: anyhow::Result<()>, style: TermStyle) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let status = exit_status(&err);
            if status == INTERRUPTED {
                eprintln!("{}", style.comment("Interrupted by user"));
            } else {
                eprintln!("{}", style.error(&format!("Error: {err:#}")));
            }
            ExitCode::from(status)
        }
    }
}
