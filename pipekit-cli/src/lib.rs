//! Pipekit CLI - command-line front ends for the pipeline template and the report generator

#![deny(warnings)]

// Global invariants enforced:
// - Colour output is an explicit TermStyle value, never global state
// - The report clock is read once, in the binary, and passed down
// - Exit status: 0 success, 1 error, 130 interrupted, 2 usage (clap)

pub mod choices;
pub mod exit;
pub mod help;
pub mod logging;
pub mod output;
pub mod pipeline_cmd;
pub mod report_cmd;
pub mod style;

pub use style::TermStyle;
