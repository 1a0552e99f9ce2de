//! The `pipeline` command: BIDS-style argument handling for an analysis run

use crate::choices::{LevelArg, StrategyArg};
use crate::help::{Banner, Epilog, ExampleGroup};
use crate::logging;
use crate::style::TermStyle;
use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use pipekit_core::config::load_pipeline_config;
use pipekit_core::pipeline::{PipelineOptions, PipelineSettings, Strategy, PIPELINE_VERSION};
use std::path::PathBuf;

pub const HOMEPAGE: &str = "https://github.com/example/pipeline";

#[derive(Parser, Debug)]
#[command(name = "pipeline", version = PIPELINE_VERSION)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(max_term_width = 100)]
pub struct PipelineCli {
    /// Path to the BIDS dataset root directory.
    #[arg(value_name = "INPUT_DIR", help_heading = "Required Arguments")]
    pub input_dir: PathBuf,

    /// Path to output directory for analysis derivatives.
    #[arg(value_name = "OUTPUT_DIR", help_heading = "Required Arguments")]
    pub output_dir: PathBuf,

    /// Analysis level. Currently only 'participant' is supported.
    #[arg(value_enum, value_name = "{participant}", help_heading = "Required Arguments")]
    pub analysis_level: LevelArg,

    /// Show this help message and exit.
    #[arg(short = 'h', long, action = ArgAction::Help, help_heading = "General Options")]
    pub help: Option<bool>,

    /// Show program version and exit.
    #[arg(long, action = ArgAction::Version, help_heading = "General Options")]
    pub version: Option<bool>,

    /// Enable verbose output (DEBUG level logging).
    #[arg(short, long, help_heading = "General Options")]
    pub verbose: bool,

    /// Path to configuration file (.json, .yaml, or .yml). CLI arguments
    /// override config file settings.
    #[arg(short, long, value_name = "FILE", help_heading = "General Options")]
    pub config: Option<PathBuf>,

    /// Specify location of BIDS derivatives. Format: name=path (e.g.,
    /// preprocessed=/data/derivatives/preproc). Can be specified multiple times.
    #[arg(
        short,
        long = "derivatives",
        value_name = "NAME=PATH",
        help_heading = "Input Derivatives Options"
    )]
    pub derivatives: Vec<String>,

    /// Process one or more participants (without 'sub-' prefix).
    #[arg(
        short,
        long,
        value_name = "LABEL",
        num_args = 1..,
        help_heading = "BIDS Entity Filters"
    )]
    pub participant_label: Option<Vec<String>>,

    /// Process only this task (without 'task-' prefix).
    #[arg(short, long, value_name = "TASK", help_heading = "BIDS Entity Filters")]
    pub task: Option<String>,

    /// Process only this session (without 'ses-' prefix).
    #[arg(short, long, value_name = "SESSION", help_heading = "BIDS Entity Filters")]
    pub session: Option<String>,

    /// Process only this run number.
    #[arg(short, long, value_name = "RUN", help_heading = "BIDS Entity Filters")]
    pub run: Option<u32>,

    /// Process only data in this template space (e.g., 'MNI152NLin2009cAsym').
    #[arg(long, value_name = "SPACE", help_heading = "BIDS Entity Filters")]
    pub space: Option<String>,

    /// Custom label added to all output filenames (BIDS entity).
    #[arg(long, value_name = "STRING", help_heading = "BIDS Entity Filters")]
    pub label: Option<String>,

    /// Use a predefined analysis strategy. See ANALYSIS STRATEGIES section
    /// for details.
    #[arg(long, value_enum, value_name = "STRATEGY", help_heading = "Processing Options")]
    pub strategy: Option<StrategyArg>,

    /// Low-frequency cutoff for temporal filtering in Hz.
    #[arg(long, value_name = "HZ", help_heading = "Processing Options")]
    pub low_freq: Option<f64>,

    /// High-frequency cutoff for temporal filtering in Hz.
    #[arg(long, value_name = "HZ", help_heading = "Processing Options")]
    pub high_freq: Option<f64>,

    /// Overwrite existing output files.
    #[arg(long, help_heading = "Processing Options")]
    pub overwrite: bool,

    /// Quality threshold for volume selection. Volumes with values below this
    /// threshold will be excluded from analysis.
    #[arg(long, value_name = "VALUE", help_heading = "Temporal Processing Options")]
    pub threshold: Option<f64>,

    /// Extend exclusion to N volumes before AND after flagged volumes
    /// (default: 0).
    #[arg(long, value_name = "N", help_heading = "Temporal Processing Options")]
    pub extend: Option<u32>,

    /// Minimum contiguous segment length to retain after volume exclusion.
    /// Segments shorter than this will be removed. Requires --threshold.
    #[arg(long, value_name = "N", help_heading = "Temporal Processing Options")]
    pub min_segment_length: Option<u32>,

    /// Number of initial volumes to drop (default: 0).
    #[arg(long, value_name = "N", help_heading = "Temporal Processing Options")]
    pub drop_initial: Option<u32>,
}

impl PipelineCli {
    /// The command-line layer of pipeline options. Derivative tokens are kept
    /// raw and parsed during resolution.
    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            verbose: self.verbose.then_some(true),
            derivatives: None,
            participant_label: self.participant_label.clone(),
            task: self.task.clone(),
            session: self.session.clone(),
            run: self.run,
            space: self.space.clone(),
            label: self.label.clone(),
            strategy: self.strategy.map(Strategy::from),
            low_freq: self.low_freq,
            high_freq: self.high_freq,
            overwrite: self.overwrite.then_some(true),
            threshold: self.threshold,
            extend: self.extend,
            min_segment_length: self.min_segment_length,
            drop_initial: self.drop_initial,
        }
    }
}

/// The clap command with banner, epilog and styles attached
pub fn command(style: TermStyle) -> clap::Command {
    PipelineCli::command()
        .before_help(banner(style))
        .after_help(epilog(style))
        .styles(style.clap_styles())
}

fn banner(style: TermStyle) -> String {
    let title = format!("ANALYSIS PIPELINE v{}", PIPELINE_VERSION);
    Banner {
        title: &title,
        subtitle: "BIDS-based Analysis Tool Template",
        description: &[
            "This tool performs BIDS-compliant analysis on neuroimaging data. It processes",
            "preprocessed data and applies standardized workflows to produce analysis-ready",
            "outputs that conform to BIDS derivative standards.",
        ],
        workflow: &[
            "Discover input data from BIDS dataset structure",
            "Validate data integrity and consistency",
            "Configure analysis parameters",
            "Execute main processing pipeline",
            "Generate BIDS-compliant outputs with metadata",
            "Produce analysis reports and quality metrics",
        ],
    }
    .render(style)
}

fn epilog(style: TermStyle) -> String {
    let strategies: Vec<(&str, &str)> = Strategy::ALL
        .iter()
        .map(|s| (s.name(), s.description()))
        .collect();

    Epilog::new(style)
        .examples(&[
            ExampleGroup {
                heading: "Basic Usage:",
                examples: &[
                    (
                        "Process all subjects with default settings",
                        "pipeline /data/bids /data/derivatives/output participant",
                    ),
                    (
                        "Process a specific subject",
                        "pipeline /data/bids /data/derivatives/output participant \\\n    --participant-label 01",
                    ),
                ],
            },
            ExampleGroup {
                heading: "Using Processing Strategies:",
                examples: &[
                    (
                        "Use minimal analysis pipeline",
                        "pipeline /data/bids /data/output participant --strategy minimal",
                    ),
                    (
                        "Use advanced analysis pipeline",
                        "pipeline /data/bids /data/output participant --strategy advanced",
                    ),
                    (
                        "Use custom configuration",
                        "pipeline /data/bids /data/output participant --strategy custom --config config.yaml",
                    ),
                ],
            },
            ExampleGroup {
                heading: "Specifying Input Derivatives:",
                examples: &[(
                    "When input derivatives are not in default location",
                    "pipeline /data/bids /data/output participant \\\n    --derivatives preprocessed=/data/derivatives/preproc",
                )],
            },
            ExampleGroup {
                heading: "Temporal Processing:",
                examples: &[
                    (
                        "Apply temporal filtering",
                        "pipeline /data/bids /data/output participant \\\n    --strategy standard --low-freq 0.01 --high-freq 0.1",
                    ),
                    (
                        "Process a specific subset of data",
                        "pipeline /data/bids /data/output participant \\\n    --task mytask --session 01 --space MNI",
                    ),
                    (
                        "Drop initial volumes and set minimum segment length",
                        "pipeline /data/bids /data/output participant \\\n    --drop-initial 4 --min-segment-length 5",
                    ),
                ],
            },
        ])
        .definitions(
            "ANALYSIS STRATEGIES",
            &strategies,
            "Strategy selection affects which processing modules are\nexecuted and their parameter defaults.",
        )
        .more_information(HOMEPAGE, PIPELINE_VERSION)
        .build()
}

/// Resolve settings and print the placeholder run summary
pub fn run(cli: PipelineCli) -> Result<()> {
    let file_layer = match &cli.config {
        Some(path) => load_pipeline_config(path)?,
        None => PipelineOptions::default(),
    };
    let options = cli.options().overlay(file_layer);
    options.validate()?;

    logging::init(options.verbose.unwrap_or(false));
    if let Some(path) = &cli.config {
        log::debug!("Using config: {}", path.display());
    }

    let settings = PipelineSettings::resolve(
        cli.input_dir,
        cli.output_dir,
        cli.analysis_level.into(),
        options,
        &cli.derivatives,
        cli.config,
    )?;

    for line in settings.detail_lines() {
        log::debug!("{}", line);
    }
    for line in settings.summary_lines() {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;

    fn parse(args: &[&str]) -> PipelineCli {
        let matches = command(TermStyle::plain())
            .try_get_matches_from(args)
            .unwrap();
        PipelineCli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        command(TermStyle::plain()).debug_assert();
    }

    #[test]
    fn test_positionals_and_defaults() {
        let cli = parse(&["pipeline", "/data/bids", "/data/out", "participant"]);
        assert_eq!(cli.input_dir, PathBuf::from("/data/bids"));
        assert_eq!(cli.analysis_level, LevelArg::Participant);
        assert!(cli.derivatives.is_empty());
        assert_eq!(cli.options(), PipelineOptions::default());
    }

    #[test]
    fn test_repeated_flags_collect_in_order() {
        let cli = parse(&[
            "pipeline", "in", "out", "participant",
            "-d", "a=/x", "--derivatives", "b=/y",
            "-p", "01", "02", "--participant-label", "03",
            "--strategy", "advanced", "--low-freq", "0.01", "--run", "2",
        ]);
        assert_eq!(cli.derivatives, vec!["a=/x", "b=/y"]);
        let options = cli.options();
        assert_eq!(
            options.participant_label,
            Some(vec!["01".to_string(), "02".to_string(), "03".to_string()])
        );
        assert_eq!(options.strategy, Some(Strategy::Advanced));
        assert_eq!(options.low_freq, Some(0.01));
        assert_eq!(options.run, Some(2));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = command(TermStyle::plain()).try_get_matches_from(["pipeline", "in", "out", "group"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_lists_groups_and_epilog() {
        let help = command(TermStyle::plain()).render_long_help().to_string();
        for heading in [
            "Required Arguments",
            "General Options",
            "Input Derivatives Options",
            "BIDS Entity Filters",
            "Processing Options",
            "Temporal Processing Options",
            "ANALYSIS PIPELINE v0.1.0",
            "EXAMPLES",
            "ANALYSIS STRATEGIES",
            "MORE INFORMATION",
        ] {
            assert!(help.contains(heading), "missing {heading}");
        }
    }
}
