//! Command-line value enums and their mapping onto core types

use clap::ValueEnum;
use pipekit_core::pipeline::AnalysisLevel;
use pipekit_core::report::{ExportFormat, PlotFormat};
use pipekit_core::{Section, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Participant,
}

impl From<LevelArg> for AnalysisLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Participant => AnalysisLevel::Participant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Minimal,
    Standard,
    Advanced,
    Custom,
}

impl From<StrategyArg> for Strategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Minimal => Strategy::Minimal,
            StrategyArg::Standard => Strategy::Standard,
            StrategyArg::Advanced => Strategy::Advanced,
            StrategyArg::Custom => Strategy::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Summary,
    Metrics,
    Visualizations,
    Quality,
    Metadata,
}

impl From<SectionArg> for Section {
    fn from(section: SectionArg) -> Self {
        match section {
            SectionArg::Summary => Section::Summary,
            SectionArg::Metrics => Section::Metrics,
            SectionArg::Visualizations => Section::Visualizations,
            SectionArg::Quality => Section::Quality,
            SectionArg::Metadata => Section::Metadata,
        }
    }
}

/// Theme names accepted on the command line; `custom` starts from light
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Minimal,
    Custom,
}

impl ThemeArg {
    pub fn name(self) -> &'static str {
        match self {
            ThemeArg::Light => "light",
            ThemeArg::Dark => "dark",
            ThemeArg::Minimal => "minimal",
            ThemeArg::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotFormatArg {
    Svg,
    Png,
    Interactive,
}

impl From<PlotFormatArg> for PlotFormat {
    fn from(format: PlotFormatArg) -> Self {
        match format {
            PlotFormatArg::Svg => PlotFormat::Svg,
            PlotFormatArg::Png => PlotFormat::Png,
            PlotFormatArg::Interactive => PlotFormat::Interactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    Html,
    Pdf,
    Markdown,
}

impl From<ExportArg> for ExportFormat {
    fn from(format: ExportArg) -> Self {
        match format {
            ExportArg::Html => ExportFormat::Html,
            ExportArg::Pdf => ExportFormat::Pdf,
            ExportArg::Markdown => ExportFormat::Markdown,
        }
    }
}
