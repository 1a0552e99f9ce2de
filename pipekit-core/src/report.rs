//! Report requests and layered report options
//!
//! A [`ReportRequest`] is everything the renderer needs. [`ReportOptions`] is
//! the partially-filled form read from a config file or built from CLI flags;
//! layers are overlaid and then turned into a request.

use crate::section::Section;
use crate::theme::{PaletteOverrides, StyleRole, Theme};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Analysis Report";
pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_DPI: u32 = 100;

/// Metadata key reserved for the report author
pub const AUTHOR_KEY: &str = "Author";
/// Metadata key used for `--analysis-id`
pub const ANALYSIS_ID_KEY: &str = "Analysis ID";

/// Ordered metadata shown in the report header
pub type Metadata = IndexMap<String, String>;

/// How user-supplied text is interpolated into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEscaping {
    /// Insert text verbatim. Markup in titles, tags or metadata is passed through.
    #[default]
    Raw,
    /// Escape HTML special characters before insertion
    Html,
}

/// Input to [`crate::html::render_html_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub title: String,
    pub description: Option<String>,
    /// Section identifiers in display order; `None` selects the defaults
    pub sections: Option<Vec<String>>,
    /// Theme name; unknown names fall back to light
    pub theme: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    pub palette_overrides: PaletteOverrides,
    /// Logo image reference placed in the header (linked, not embedded)
    pub logo: Option<String>,
    pub escaping: TextEscaping,
}

impl ReportRequest {
    pub fn new(title: impl Into<String>) -> Self {
        ReportRequest {
            title: title.into(),
            description: None,
            sections: None,
            theme: DEFAULT_THEME.to_string(),
            author: None,
            tags: Vec::new(),
            metadata: Metadata::new(),
            palette_overrides: PaletteOverrides::new(),
            logo: None,
            escaping: TextEscaping::Raw,
        }
    }

    /// Section identifiers that will actually be rendered
    pub fn effective_sections(&self) -> Vec<String> {
        match &self.sections {
            Some(sections) => sections.clone(),
            None => crate::section::DEFAULT_SECTIONS
                .iter()
                .map(|s| s.id().to_string())
                .collect(),
        }
    }

    /// Metadata with the author written under [`AUTHOR_KEY`]. An existing
    /// entry keeps its position and takes the new value.
    pub fn effective_metadata(&self) -> Metadata {
        let mut metadata = self.metadata.clone();
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            metadata.insert(AUTHOR_KEY.to_string(), author.to_string());
        }
        metadata
    }
}

/// Requested export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
    Markdown,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Markdown => "markdown",
        }
    }

    pub fn is_supported(self) -> bool {
        matches!(self, ExportFormat::Html)
    }
}

/// Plot rendering format for visualizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    Svg,
    Png,
    #[default]
    Interactive,
}

/// One layer of report options (config file or command line)
///
/// All fields are optional; [`ReportOptions::overlay`] merges a higher
/// priority layer onto a lower one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
    /// Theme name: light, dark, minimal or custom
    #[serde(default)]
    pub theme: Option<String>,
    /// Palette overrides keyed by style role
    #[serde(default)]
    pub colors: Option<PaletteOverrides>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub logo: Option<PathBuf>,
    #[serde(default)]
    pub plot_format: Option<PlotFormat>,
    #[serde(default)]
    pub dpi: Option<u32>,
    #[serde(default)]
    pub export: Option<Vec<ExportFormat>>,
}

impl ReportOptions {
    /// Validate the options for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(theme) = &self.theme {
            if Theme::parse(theme).is_none() && theme != "custom" {
                anyhow::bail!(
                    "theme must be one of light, dark, minimal, custom (got '{}')",
                    theme
                );
            }
        }
        if let Some(dpi) = self.dpi {
            if dpi == 0 {
                anyhow::bail!("dpi must be positive (got {})", dpi);
            }
        }
        if let Some(export) = &self.export {
            if export.is_empty() {
                anyhow::bail!("export must list at least one format");
            }
        }
        Ok(())
    }

    /// Overlay `self` on `lower`: every field set here wins. Colour overrides
    /// and metadata merge key by key.
    pub fn overlay(self, lower: ReportOptions) -> ReportOptions {
        ReportOptions {
            title: self.title.or(lower.title),
            description: self.description.or(lower.description),
            analysis_id: self.analysis_id.or(lower.analysis_id),
            author: self.author.or(lower.author),
            tags: self.tags.or(lower.tags),
            sections: self.sections.or(lower.sections),
            theme: self.theme.or(lower.theme),
            colors: merge_maps(lower.colors, self.colors),
            font_family: self.font_family.or(lower.font_family),
            metadata: merge_maps(lower.metadata, self.metadata),
            logo: self.logo.or(lower.logo),
            plot_format: self.plot_format.or(lower.plot_format),
            dpi: self.dpi.or(lower.dpi),
            export: self.export.or(lower.export),
        }
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    pub fn plot_format(&self) -> PlotFormat {
        self.plot_format.unwrap_or_default()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi.unwrap_or(DEFAULT_DPI)
    }

    pub fn export_formats(&self) -> Vec<ExportFormat> {
        self.export.clone().unwrap_or_else(|| vec![ExportFormat::Html])
    }

    /// Palette overrides: `colors`, then `font_family` on top
    pub fn palette_overrides(&self) -> PaletteOverrides {
        let mut overrides = self.colors.clone().unwrap_or_default();
        if let Some(font) = &self.font_family {
            overrides.insert(StyleRole::FontFamily, font.clone());
        }
        overrides
    }

    /// Build the render request, applying defaults for unset fields
    pub fn into_request(self, escaping: TextEscaping) -> ReportRequest {
        let palette_overrides = self.palette_overrides();
        if self.theme_name() == "custom" && palette_overrides.is_empty() {
            log::warn!("theme 'custom' has no colour overrides; rendering with the light palette");
        }

        let mut metadata = self.metadata.unwrap_or_default();
        if let Some(id) = self.analysis_id.filter(|id| !id.is_empty()) {
            metadata.insert(ANALYSIS_ID_KEY.to_string(), id);
        }

        ReportRequest {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self.description,
            sections: self
                .sections
                .map(|s| s.iter().map(|section| section.id().to_string()).collect()),
            theme: self.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            author: self.author,
            tags: self.tags.unwrap_or_default(),
            metadata,
            palette_overrides,
            logo: self.logo.map(|p| p.display().to_string()),
            escaping,
        }
    }
}

fn merge_maps<K, V, M>(lower: Option<M>, upper: Option<M>) -> Option<M>
where
    M: IntoIterator<Item = (K, V)> + Extend<(K, V)>,
{
    match (lower, upper) {
        (Some(mut base), Some(top)) => {
            base.extend(top);
            Some(base)
        }
        (base, None) => base,
        (None, top) => top,
    }
}

/// Resolve `--color-scheme`: a built-in theme name yields that palette as
/// overrides, anything else is read as a role → value file.
pub fn load_color_scheme(scheme: &str) -> Result<PaletteOverrides> {
    if let Some(theme) = Theme::parse(scheme) {
        return Ok(theme.palette().to_overrides());
    }
    let path = PathBuf::from(scheme);
    crate::config::load_config_file::<PaletteOverrides>(&path)
        .with_context(|| format!("failed to load color scheme: {}", scheme))
}
