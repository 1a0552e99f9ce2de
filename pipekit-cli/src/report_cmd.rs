//! The `generate-report` command: render an HTML report from options

use crate::choices::{ExportArg, PlotFormatArg, SectionArg, ThemeArg};
use crate::help::{Banner, Epilog, ExampleGroup};
use crate::output::{check_overwrite, write_html_report};
use crate::style::TermStyle;
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{ArgAction, CommandFactory, Parser};
use pipekit_core::config::load_report_config;
use pipekit_core::report::{load_color_scheme, ExportFormat, ReportOptions};
use pipekit_core::section::GENERATOR_VERSION;
use pipekit_core::{render_html_report, validate_report, TextEscaping};
use std::path::PathBuf;

pub const HOMEPAGE: &str = "https://github.com/example/report-template";

#[derive(Parser, Debug)]
#[command(name = "generate-report", version = GENERATOR_VERSION)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(max_term_width = 100)]
pub struct ReportCli {
    /// Path to directory containing analysis outputs and metrics.
    #[arg(value_name = "INPUT_DIR", help_heading = "Required Arguments")]
    pub input_dir: PathBuf,

    /// Path to output HTML report file.
    #[arg(value_name = "OUTPUT_FILE", help_heading = "Required Arguments")]
    pub output_file: PathBuf,

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

    /// Report title displayed in header (default: 'Analysis Report').
    #[arg(long, value_name = "TEXT", help_heading = "Report Content Options")]
    pub title: Option<String>,

    /// Report description or summary text.
    #[arg(long, value_name = "TEXT", help_heading = "Report Content Options")]
    pub description: Option<String>,

    /// Unique identifier for this analysis.
    #[arg(long, value_name = "ID", help_heading = "Report Content Options")]
    pub analysis_id: Option<String>,

    /// Report author name.
    #[arg(long, value_name = "NAME", help_heading = "Report Content Options")]
    pub author: Option<String>,

    /// Tag report with keywords (can be specified multiple times).
    #[arg(long, value_name = "TAG", num_args = 1.., help_heading = "Report Content Options")]
    pub tags: Option<Vec<String>>,

    /// Which sections to include in report (default: summary metrics
    /// visualizations).
    #[arg(
        long,
        value_enum,
        value_name = "SECTION",
        num_args = 1..,
        help_heading = "Report Content Options"
    )]
    pub sections: Option<Vec<SectionArg>>,

    /// Report color theme (default: light).
    #[arg(long, value_enum, value_name = "THEME", help_heading = "Styling Options")]
    pub theme: Option<ThemeArg>,

    /// Custom color scheme name or path to color configuration.
    #[arg(long, value_name = "SCHEME", help_heading = "Styling Options")]
    pub color_scheme: Option<String>,

    /// CSS font family for report text.
    #[arg(long, value_name = "FONT", help_heading = "Styling Options")]
    pub font_family: Option<String>,

    /// Path to logo image to show in report header.
    #[arg(long, value_name = "PATH", help_heading = "Styling Options")]
    pub logo: Option<PathBuf>,

    /// Embed all assets (images, CSS) directly in HTML file for portability.
    #[arg(long, help_heading = "Styling Options")]
    pub embed_assets: bool,

    /// Escape HTML special characters in titles, tags and metadata.
    #[arg(long, help_heading = "Styling Options")]
    pub escape_html: bool,

    /// Format for plot generation (default: interactive).
    #[arg(long, value_enum, value_name = "FORMAT", help_heading = "Visualization Options")]
    pub plot_format: Option<PlotFormatArg>,

    /// DPI resolution for raster images (default: 100).
    #[arg(long, value_name = "DPI", help_heading = "Visualization Options")]
    pub dpi: Option<u32>,

    /// Include thumbnail previews of images in report.
    #[arg(long, help_heading = "Visualization Options")]
    pub include_thumbnails: bool,

    /// Export formats for report (default: html).
    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        num_args = 1..,
        help_heading = "Output Options"
    )]
    pub export: Option<Vec<ExportArg>>,

    /// Overwrite existing output files.
    #[arg(long, help_heading = "Output Options")]
    pub overwrite: bool,

    /// Validate report integrity and completeness after generation.
    #[arg(long, help_heading = "Output Options")]
    pub validate: bool,
}

impl ReportCli {
    /// The command-line layer of report options. `--color-scheme` is
    /// resolved separately since it may read a file.
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            title: self.title.clone(),
            description: self.description.clone(),
            analysis_id: self.analysis_id.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            sections: self
                .sections
                .as_ref()
                .map(|sections| sections.iter().map(|&s| s.into()).collect()),
            theme: self.theme.map(|t| t.name().to_string()),
            colors: None,
            font_family: self.font_family.clone(),
            metadata: None,
            logo: self.logo.clone(),
            plot_format: self.plot_format.map(Into::into),
            dpi: self.dpi,
            export: self
                .export
                .as_ref()
                .map(|formats| formats.iter().map(|&f| f.into()).collect()),
        }
    }

    pub fn escaping(&self) -> TextEscaping {
        if self.escape_html {
            TextEscaping::Html
        } else {
            TextEscaping::Raw
        }
    }
}

/// The clap command with banner, epilog and styles attached
pub fn command(style: TermStyle) -> clap::Command {
    ReportCli::command()
        .before_help(banner(style))
        .after_help(epilog(style))
        .styles(style.clap_styles())
}

fn banner(style: TermStyle) -> String {
    let title = format!("ANALYSIS REPORT GENERATOR v{}", GENERATOR_VERSION);
    Banner {
        title: &title,
        subtitle: "Portable HTML Report Generation Tool",
        description: &[
            "This tool generates standardized HTML reports from analysis outputs. It",
            "combines analysis metrics, visualizations, and quality assessment into a",
            "professional, portable HTML document with consistent styling and layout.",
        ],
        workflow: &[
            "Collect analysis input data and metrics",
            "Configure report appearance and content",
            "Generate HTML report with embedded assets",
            "Apply consistent styling and formatting",
            "Produce standalone, portable report file",
            "Validate report integrity and completeness",
        ],
    }
    .render(style)
}

fn epilog(style: TermStyle) -> String {
    Epilog::new(style)
        .examples(&[
            ExampleGroup {
                heading: "Basic Usage:",
                examples: &[
                    (
                        "Generate report with default settings",
                        "generate-report /data/inputs /reports/output.html",
                    ),
                    (
                        "Generate report for specific analysis",
                        "generate-report /data/inputs /reports/output.html --analysis-id analysis_001",
                    ),
                ],
            },
            ExampleGroup {
                heading: "Styling and Appearance:",
                examples: &[
                    (
                        "Generate report with custom theme",
                        "generate-report /data/inputs /reports/output.html --theme dark",
                    ),
                    (
                        "Generate report with custom color scheme",
                        "generate-report /data/inputs /reports/output.html --color-scheme colors.yaml --config style.yaml",
                    ),
                    (
                        "Generate report with embedded assets",
                        "generate-report /data/inputs /reports/output.html --embed-assets",
                    ),
                ],
            },
            ExampleGroup {
                heading: "Content Configuration:",
                examples: &[
                    (
                        "Include specific sections in report",
                        "generate-report /data/inputs /reports/output.html \\\n    --sections summary metrics visualizations",
                    ),
                    (
                        "Generate report with custom title and description",
                        "generate-report /data/inputs /reports/output.html \\\n    --title \"My Analysis Report\" --description \"Analysis of dataset XYZ\"",
                    ),
                    (
                        "Generate report with metadata",
                        "generate-report /data/inputs /reports/output.html \\\n    --author \"Jane Smith\" --tags analysis quality-metrics",
                    ),
                ],
            },
            ExampleGroup {
                heading: "Output Options:",
                examples: &[
                    (
                        "Override existing report",
                        "generate-report /data/inputs /reports/output.html --overwrite",
                    ),
                    (
                        "Generate multiple format exports",
                        "generate-report /data/inputs /reports/output --export html pdf",
                    ),
                    (
                        "Generate verbose report with detailed logging",
                        "generate-report /data/inputs /reports/output.html -v",
                    ),
                ],
            },
        ])
        .definitions(
            "REPORT THEMES",
            &[
                ("light", "Light theme - clean, professional appearance"),
                ("dark", "Dark theme - reduced eye strain in low light"),
                ("minimal", "Minimal theme - focus on content"),
                ("custom", "Custom theme - requires --config file"),
            ],
            "Theme selection affects color scheme, typography, and\noverall visual presentation of the report.",
        )
        .more_information(HOMEPAGE, GENERATOR_VERSION)
        .build()
}

/// Merge the config file and command line into one options layer
pub fn resolve_options(cli: &ReportCli) -> Result<ReportOptions> {
    let file_layer = match &cli.config {
        Some(path) => load_report_config(path)?,
        None => ReportOptions::default(),
    };
    let mut cli_layer = cli.options();
    if let Some(scheme) = &cli.color_scheme {
        cli_layer.colors = Some(load_color_scheme(scheme)?);
    }
    let options = cli_layer.overlay(file_layer);
    options.validate()?;
    Ok(options)
}

/// Warn about accepted options that have no effect on the output
fn warn_unapplied(cli: &ReportCli, options: &ReportOptions) {
    if cli.embed_assets {
        log::warn!("--embed-assets is not applied; assets are referenced, not embedded");
    }
    if cli.include_thumbnails {
        log::warn!("--include-thumbnails is not applied; no images are generated");
    }
    log::debug!(
        "plot format: {:?}, dpi: {} (placeholder visualizations only)",
        options.plot_format(),
        options.dpi()
    );
    for format in options.export_formats() {
        if !format.is_supported() {
            log::warn!("export format '{}' is not supported yet; skipped", format.name());
        }
    }
    if !options.export_formats().contains(&ExportFormat::Html) {
        log::warn!("html export not requested; writing the HTML report anyway");
    }
}

/// Render, optionally validate, and write the report
pub fn run(cli: ReportCli, style: TermStyle, generated_at: NaiveDateTime) -> Result<()> {
    let options = resolve_options(&cli)?;
    if let Some(path) = &cli.config {
        log::debug!("Using config: {}", path.display());
    }
    warn_unapplied(&cli, &options);
    check_overwrite(&cli.output_file, cli.overwrite)?;

    println!("{}", style.banner("Generating HTML Report..."));
    println!("  Input: {}", cli.input_dir.display());
    println!("  Output: {}", cli.output_file.display());
    println!("  Theme: {}", options.theme_name());

    let request = options.into_request(cli.escaping());
    log::debug!(
        "title: '{}', sections: {}",
        request.title,
        request.effective_sections().join(", ")
    );
    let html = render_html_report(&request, generated_at)?;

    if cli.validate {
        let issues = validate_report(&html, &request.effective_sections());
        if !issues.is_empty() {
            for issue in &issues {
                log::error!("{}", issue);
            }
            anyhow::bail!("report failed validation with {} issue(s)", issues.len());
        }
        log::info!("report validation passed");
    }

    write_html_report(&cli.output_file, &html)?;

    println!("{}", style.success("✓ Report generated successfully"));
    println!("  Location: {}", cli.output_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;
    use pipekit_core::report::PlotFormat;
    use pipekit_core::{Section, StyleRole};
    use std::fs;

    fn parse(args: &[&str]) -> ReportCli {
        let matches = command(TermStyle::plain())
            .try_get_matches_from(args)
            .unwrap();
        ReportCli::from_arg_matches(&matches).unwrap()
    }

    fn frozen() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        command(TermStyle::plain()).debug_assert();
    }

    #[test]
    fn test_cli_layer() {
        let cli = parse(&[
            "generate-report", "in", "out.html",
            "--sections", "quality", "summary",
            "--theme", "dark",
            "--tags", "a", "b", "--tags", "c",
            "--plot-format", "svg",
            "--export", "html", "pdf",
            "--analysis-id", "analysis_001",
        ]);
        let options = cli.options();
        assert_eq!(options.sections, Some(vec![Section::Quality, Section::Summary]));
        assert_eq!(options.theme_name(), "dark");
        assert_eq!(
            options.tags,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(options.plot_format(), PlotFormat::Svg);
        assert_eq!(
            options.export_formats(),
            vec![ExportFormat::Html, ExportFormat::Pdf]
        );
        assert_eq!(cli.escaping(), TextEscaping::Raw);
    }

    #[test]
    fn test_invalid_section_choice_is_rejected() {
        let result = command(TermStyle::plain()).try_get_matches_from([
            "generate-report",
            "in",
            "out.html",
            "--sections",
            "appendix",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("report.json");
        fs::write(
            &config,
            r##"{"title": "From file", "theme": "minimal", "colors": {"accent_color": "#010101"}}"##,
        )
        .unwrap();
        let config_arg = config.to_str().unwrap();

        let cli = parse(&[
            "generate-report", "in", "out.html",
            "-c", config_arg,
            "--title", "From CLI",
            "--font-family", "monospace",
        ]);
        let options = resolve_options(&cli).unwrap();
        assert_eq!(options.title.as_deref(), Some("From CLI"));
        assert_eq!(options.theme_name(), "minimal");
        let overrides = options.palette_overrides();
        assert_eq!(overrides[&StyleRole::AccentColor], "#010101");
        assert_eq!(overrides[&StyleRole::FontFamily], "monospace");
    }

    #[test]
    fn test_color_scheme_layers_over_config_colors() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("report.yaml");
        fs::write(&config, "colors:\n  accent_color: \"#010101\"\n  tag_bg: \"#020202\"\n").unwrap();
        let scheme = dir.path().join("scheme.json");
        fs::write(&scheme, r##"{"accent_color": "#030303"}"##).unwrap();

        let cli = parse(&[
            "generate-report", "in", "out.html",
            "--config", config.to_str().unwrap(),
            "--color-scheme", scheme.to_str().unwrap(),
        ]);
        let overrides = resolve_options(&cli).unwrap().palette_overrides();
        assert_eq!(overrides[&StyleRole::AccentColor], "#030303");
        assert_eq!(overrides[&StyleRole::TagBg], "#020202");
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("reports/out.html");
        let cli = parse(&[
            "generate-report",
            "in",
            output.to_str().unwrap(),
            "--title",
            "Run Test",
            "--validate",
        ]);
        run(cli, TermStyle::plain(), frozen()).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Run Test</title>"));
        assert!(html.contains("&copy; 2024 Analysis Report."));
    }

    #[test]
    fn test_run_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.html");
        fs::write(&output, "keep me").unwrap();

        let cli = parse(&["generate-report", "in", output.to_str().unwrap()]);
        assert!(run(cli, TermStyle::plain(), frozen()).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
    }
}
