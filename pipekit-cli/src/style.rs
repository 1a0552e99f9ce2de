//! Terminal styling
//!
//! Colour is a capability decided once per stream and passed to whatever
//! prints. Escape codes are only emitted when the stream is a terminal and
//! `NO_COLOR` is unset.

use clap::builder::styling::{AnsiColor, Style, Styles};
use std::io::IsTerminal;

const HEADING: Style = AnsiColor::Cyan.on_default().bold();
const BANNER: Style = AnsiColor::Green.on_default().bold();
const SUCCESS: Style = AnsiColor::Green.on_default();
const COMMENT: Style = AnsiColor::Yellow.on_default();
const TERM: Style = AnsiColor::Cyan.on_default();
const ERROR: Style = AnsiColor::Red.on_default();
const BOLD: Style = Style::new().bold();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermStyle {
    enabled: bool,
}

impl TermStyle {
    pub fn new(enabled: bool) -> Self {
        TermStyle { enabled }
    }

    pub fn plain() -> Self {
        TermStyle::new(false)
    }

    pub fn for_stdout() -> Self {
        TermStyle::new(color_allowed() && std::io::stdout().is_terminal())
    }

    pub fn for_stderr() -> Self {
        TermStyle::new(color_allowed() && std::io::stderr().is_terminal())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", style.render(), text, style.render_reset())
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn banner(&self, text: &str) -> String {
        self.paint(BANNER, text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(SUCCESS, text)
    }

    /// Shell comments in examples, and interrupt notices
    pub fn comment(&self, text: &str) -> String {
        self.paint(COMMENT, text)
    }

    /// Names in definition lists (strategies, themes)
    pub fn term(&self, text: &str) -> String {
        self.paint(TERM, text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(ERROR, text)
    }

    /// Styles for the parts of help output clap renders itself
    pub fn clap_styles(&self) -> Styles {
        if self.enabled {
            Styles::styled()
                .header(HEADING)
                .usage(BOLD)
                .literal(AnsiColor::Green.on_default())
                .placeholder(AnsiColor::Yellow.on_default())
        } else {
            Styles::plain()
        }
    }
}

fn color_allowed() -> bool {
    std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_emits_no_escapes() {
        let style = TermStyle::plain();
        assert_eq!(style.bold("Usage"), "Usage");
        assert_eq!(style.error("Error: x"), "Error: x");
    }

    #[test]
    fn test_enabled_style_wraps_text() {
        let style = TermStyle::new(true);
        let painted = style.success("done");
        assert!(painted.starts_with('\u{1b}'));
        assert!(painted.contains("done"));
        assert!(painted.ends_with("\u{1b}[0m"));
    }
}
