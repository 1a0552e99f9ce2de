//! Report themes and colour palettes
//!
//! A palette maps every [`StyleRole`] to a CSS value. The three built-in
//! themes are complete; overrides replace values role by role.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic roles referenced by the report stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    BgColor,
    TextColor,
    HeaderBgStart,
    HeaderBgEnd,
    NavBg,
    NavLinkColor,
    AccentColor,
    SectionBg,
    CardBg,
    HeadingColor,
    MutedColor,
    BorderColor,
    ChartBg,
    TableHeaderBg,
    TableHoverBg,
    TagBg,
    TagColor,
    FooterBg,
    FooterText,
    FontFamily,
}

impl StyleRole {
    pub const ALL: [StyleRole; 20] = [
        StyleRole::BgColor,
        StyleRole::TextColor,
        StyleRole::HeaderBgStart,
        StyleRole::HeaderBgEnd,
        StyleRole::NavBg,
        StyleRole::NavLinkColor,
        StyleRole::AccentColor,
        StyleRole::SectionBg,
        StyleRole::CardBg,
        StyleRole::HeadingColor,
        StyleRole::MutedColor,
        StyleRole::BorderColor,
        StyleRole::ChartBg,
        StyleRole::TableHeaderBg,
        StyleRole::TableHoverBg,
        StyleRole::TagBg,
        StyleRole::TagColor,
        StyleRole::FooterBg,
        StyleRole::FooterText,
        StyleRole::FontFamily,
    ];

    /// Key used in config files and override mappings
    pub fn key(self) -> &'static str {
        match self {
            StyleRole::BgColor => "bg_color",
            StyleRole::TextColor => "text_color",
            StyleRole::HeaderBgStart => "header_bg_start",
            StyleRole::HeaderBgEnd => "header_bg_end",
            StyleRole::NavBg => "nav_bg",
            StyleRole::NavLinkColor => "nav_link_color",
            StyleRole::AccentColor => "accent_color",
            StyleRole::SectionBg => "section_bg",
            StyleRole::CardBg => "card_bg",
            StyleRole::HeadingColor => "heading_color",
            StyleRole::MutedColor => "muted_color",
            StyleRole::BorderColor => "border_color",
            StyleRole::ChartBg => "chart_bg",
            StyleRole::TableHeaderBg => "table_header_bg",
            StyleRole::TableHoverBg => "table_hover_bg",
            StyleRole::TagBg => "tag_bg",
            StyleRole::TagColor => "tag_color",
            StyleRole::FooterBg => "footer_bg",
            StyleRole::FooterText => "footer_text",
            StyleRole::FontFamily => "font_family",
        }
    }

    pub fn from_key(key: &str) -> Option<StyleRole> {
        StyleRole::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Built-in report themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Minimal,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Minimal];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Minimal => "minimal",
        }
    }

    /// Look up a built-in theme by exact name
    pub fn parse(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|theme| theme.name() == name)
    }

    /// Resolve a theme name, falling back to [`Theme::Light`] for anything
    /// that is not a built-in theme. `custom` also lands here: it starts from
    /// the light palette and relies on overrides.
    pub fn from_name(name: &str) -> Theme {
        match Theme::parse(name) {
            Some(theme) => theme,
            None => {
                if name != "custom" {
                    log::warn!("unknown theme '{}', falling back to light", name);
                }
                Theme::Light
            }
        }
    }

    pub fn palette(self) -> Palette {
        let values: &[&str; 20] = match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
            Theme::Minimal => &MINIMAL,
        };
        Palette::from_entries(
            StyleRole::ALL
                .into_iter()
                .zip(values.iter().map(|v| v.to_string())),
        )
    }
}

const SEGOE_STACK: &str = "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif";

// Values are listed in `StyleRole::ALL` order.
const LIGHT: [&str; 20] = [
    "#ffffff", "#333333", "#667eea", "#764ba2", "#f8f9fa", "#333333", "#667eea", "#f9f9f9",
    "#ffffff", "#2d3748", "#718096", "#e2e8f0", "#ffffff", "#667eea", "#f7fafc", "#edf2f7",
    "#2d3748", "#2d3748", "#ffffff", SEGOE_STACK,
];

const DARK: [&str; 20] = [
    "#1a202c", "#e2e8f0", "#5a67d8", "#6b46c1", "#2d3748", "#e2e8f0", "#63b3ed", "#2d3748",
    "#374151", "#e2e8f0", "#a0aec0", "#4a5568", "#2d3748", "#5a67d8", "#374151", "#4a5568",
    "#e2e8f0", "#1a202c", "#a0aec0", SEGOE_STACK,
];

const MINIMAL: [&str; 20] = [
    "#fafafa", "#444444", "#000000", "#333333", "#ffffff", "#444444", "#000000", "#ffffff",
    "#ffffff", "#000000", "#999999", "#dddddd", "#ffffff", "#333333", "#f5f5f5", "#f0f0f0",
    "#333333", "#333333", "#ffffff", "'Georgia', serif",
];

/// Partial mapping of role overrides
pub type PaletteOverrides = BTreeMap<StyleRole, String>;

/// Role → CSS value mapping used to render the stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    values: BTreeMap<StyleRole, String>,
}

impl Palette {
    /// Build a palette from arbitrary entries. The result may be incomplete;
    /// rendering reports the first missing role.
    pub fn from_entries<I>(entries: I) -> Palette
    where
        I: IntoIterator<Item = (StyleRole, String)>,
    {
        Palette {
            values: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, role: StyleRole) -> Option<&str> {
        self.values.get(&role).map(String::as_str)
    }

    pub fn require(&self, role: StyleRole) -> Result<&str, ReportError> {
        self.get(role).ok_or(ReportError::MissingStyleRole(role))
    }

    /// Apply overrides key by key; overridden roles win over the base value
    pub fn with_overrides(mut self, overrides: &PaletteOverrides) -> Palette {
        for (role, value) in overrides {
            self.values.insert(*role, value.clone());
        }
        self
    }

    /// First role missing from the palette, if any
    pub fn missing_role(&self) -> Option<StyleRole> {
        StyleRole::ALL
            .into_iter()
            .find(|role| !self.values.contains_key(role))
    }

    /// Palette values as an override mapping, used when a whole built-in
    /// scheme is layered on top of another theme
    pub fn to_overrides(&self) -> PaletteOverrides {
        self.values.clone()
    }
}

/// Select a palette by theme name and apply overrides
pub fn build_palette(theme_name: &str, overrides: &PaletteOverrides) -> Palette {
    Theme::from_name(theme_name).palette().with_overrides(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes_are_complete() {
        for theme in Theme::ALL {
            assert_eq!(theme.palette().missing_role(), None, "{}", theme.name());
        }
    }

    #[test]
    fn test_light_values() {
        let palette = Theme::Light.palette();
        assert_eq!(palette.get(StyleRole::AccentColor), Some("#667eea"));
        assert_eq!(palette.get(StyleRole::FooterBg), Some("#2d3748"));
        assert_eq!(palette.get(StyleRole::FontFamily), Some(SEGOE_STACK));
    }

    #[test]
    fn test_dark_and_minimal_values() {
        let dark = Theme::Dark.palette();
        assert_eq!(dark.get(StyleRole::BgColor), Some("#1a202c"));
        assert_eq!(dark.get(StyleRole::AccentColor), Some("#63b3ed"));
        assert_eq!(dark.get(StyleRole::FooterText), Some("#a0aec0"));

        let minimal = Theme::Minimal.palette();
        assert_eq!(minimal.get(StyleRole::HeaderBgStart), Some("#000000"));
        assert_eq!(minimal.get(StyleRole::TableHoverBg), Some("#f5f5f5"));
        assert_eq!(minimal.get(StyleRole::FontFamily), Some("'Georgia', serif"));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        assert_eq!(Theme::from_name("neon"), Theme::Light);
        assert_eq!(Theme::from_name("custom"), Theme::Light);
        assert_eq!(Theme::from_name("Dark"), Theme::Light);
        assert_eq!(Theme::from_name("dark"), Theme::Dark);
    }

    #[test]
    fn test_overrides_replace_only_named_roles() {
        let mut overrides = PaletteOverrides::new();
        overrides.insert(StyleRole::AccentColor, "#123456".to_string());
        let palette = build_palette("light", &overrides);
        assert_eq!(palette.get(StyleRole::AccentColor), Some("#123456"));
        // Roles that share the old accent value keep it
        assert_eq!(palette.get(StyleRole::HeaderBgStart), Some("#667eea"));
        assert_eq!(palette.get(StyleRole::TableHeaderBg), Some("#667eea"));
    }

    #[test]
    fn test_partial_palette_reports_missing_role() {
        let palette = Palette::from_entries([(StyleRole::BgColor, "#fff".to_string())]);
        assert_eq!(palette.missing_role(), Some(StyleRole::TextColor));
        assert_eq!(
            palette.require(StyleRole::AccentColor),
            Err(ReportError::MissingStyleRole(StyleRole::AccentColor))
        );
    }

    #[test]
    fn test_role_keys_round_trip() {
        for role in StyleRole::ALL {
            assert_eq!(StyleRole::from_key(role.key()), Some(role));
        }
        assert_eq!(StyleRole::from_key("nope"), None);
    }

    #[test]
    fn test_role_deserializes_from_snake_case_key() {
        let overrides: PaletteOverrides =
            serde_json::from_str(r##"{"accent_color": "#abcdef", "font_family": "serif"}"##)
                .unwrap();
        assert_eq!(overrides[&StyleRole::AccentColor], "#abcdef");
        assert_eq!(overrides[&StyleRole::FontFamily], "serif");
    }

    #[test]
    fn test_unknown_role_key_is_rejected() {
        let result: Result<PaletteOverrides, _> = serde_json::from_str(r#"{"glow": "red"}"#);
        assert!(result.is_err());
    }
}
