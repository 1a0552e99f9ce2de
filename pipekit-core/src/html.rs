//! HTML report generation
//!
//! Generates a single self-contained HTML document with embedded CSS and
//! JavaScript. The output depends only on the request and the supplied
//! timestamp.

use crate::error::ReportError;
use crate::report::{Metadata, ReportRequest, TextEscaping};
use crate::section::{render_section, title_case};
use crate::theme::{build_palette, Palette, StyleRole};
use chrono::{Datelike, NaiveDateTime};

const DEFAULT_META_AUTHOR: &str = "Analysis Pipeline";
const DEFAULT_META_DESCRIPTION: &str = "Generated analysis report";

/// Render a report request as an HTML document
pub fn render_html_report(
    request: &ReportRequest,
    generated_at: NaiveDateTime,
) -> Result<String, ReportError> {
    let palette = build_palette(&request.theme, &request.palette_overrides);
    let sections = request.effective_sections();
    let metadata = request.effective_metadata();
    let text = TextRenderer(request.escaping);

    let main_content: String = sections
        .iter()
        .map(|section| render_section(section, &generated_at))
        .collect();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="author" content="{author}">
    <meta name="description" content="{description}">
    <title>{title}</title>
    <style>
        {css}
    </style>
</head>
<body>
    <div class="report-container">
        {header}
        {navigation}
        {main_content}
        {footer}
    </div>
    <script>
        {js}
    </script>
</body>
</html>
"#,
        author = text.render(
            non_empty(request.author.as_deref()).unwrap_or(DEFAULT_META_AUTHOR)
        ),
        description = text.render(
            non_empty(request.description.as_deref()).unwrap_or(DEFAULT_META_DESCRIPTION)
        ),
        title = text.render(&request.title),
        css = render_css(&palette)?,
        header = render_header(
            &text,
            &request.title,
            request.description.as_deref(),
            &metadata,
            request.logo.as_deref(),
        ),
        navigation = render_navigation(&text, &sections),
        main_content = main_content,
        footer = render_footer(&text, &request.tags, generated_at.year()),
        js = inline_javascript(),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Applies the request's escaping policy to user-supplied text
struct TextRenderer(TextEscaping);

impl TextRenderer {
    fn render(&self, s: &str) -> String {
        match self.0 {
            TextEscaping::Raw => s.to_string(),
            TextEscaping::Html => html_escape(s),
        }
    }
}

/// Render the stylesheet for a palette.
///
/// Fails with [`ReportError::MissingStyleRole`] if the palette lacks a role.
pub fn render_css(palette: &Palette) -> Result<String, ReportError> {
    Ok(format!(
        r#"
    * {{
        margin: 0;
        padding: 0;
        box-sizing: border-box;
    }}

    body {{
        font-family: {font_family};
        line-height: 1.6;
        color: {text_color};
        background-color: {bg_color};
    }}

    .report-container {{
        max-width: 1200px;
        margin: 0 auto;
        padding: 20px;
    }}

    header {{
        background: linear-gradient(135deg, {header_bg_start}, {header_bg_end});
        color: white;
        padding: 40px 20px;
        border-radius: 8px;
        margin-bottom: 30px;
        box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
    }}

    header h1 {{
        font-size: 2.5em;
        margin-bottom: 10px;
    }}

    header .subtitle {{
        font-size: 1.1em;
        opacity: 0.95;
    }}

    header .logo {{
        max-height: 64px;
        margin-bottom: 15px;
    }}

    .metadata {{
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
        gap: 15px;
        margin-top: 20px;
        font-size: 0.9em;
    }}

    .metadata-item {{
        background: rgba(0, 0, 0, 0.1);
        padding: 10px;
        border-radius: 4px;
    }}

    .metadata-label {{
        font-weight: bold;
        opacity: 0.9;
    }}

    nav {{
        background: {nav_bg};
        padding: 0;
        margin-bottom: 30px;
        border-radius: 4px;
        box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
        position: sticky;
        top: 0;
        z-index: 100;
    }}

    nav ul {{
        list-style: none;
        display: flex;
        flex-wrap: wrap;
    }}

    nav li {{
        flex: 1;
        min-width: 120px;
    }}

    nav a {{
        display: block;
        padding: 15px 20px;
        color: {nav_link_color};
        text-decoration: none;
        border-bottom: 3px solid transparent;
        transition: all 0.3s ease;
    }}

    nav a:hover {{
        border-bottom-color: {accent_color};
        background: rgba(0, 0, 0, 0.05);
    }}

    .section {{
        margin-bottom: 40px;
        padding: 20px;
        background: {section_bg};
        border-radius: 8px;
        box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
    }}

    .section h2 {{
        color: {heading_color};
        font-size: 1.8em;
        margin-bottom: 20px;
        border-bottom: 2px solid {accent_color};
        padding-bottom: 10px;
    }}

    .section h3 {{
        color: {heading_color};
        font-size: 1.3em;
        margin-top: 20px;
        margin-bottom: 10px;
    }}

    .metrics-grid {{
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
        gap: 20px;
        margin: 20px 0;
    }}

    .metric-card {{
        background: {card_bg};
        border: 1px solid {border_color};
        border-radius: 8px;
        padding: 20px;
        text-align: center;
        transition: transform 0.2s ease;
    }}

    .metric-card:hover {{
        transform: translateY(-5px);
        box-shadow: 0 5px 15px rgba(0, 0, 0, 0.15);
    }}

    .metric-value {{
        font-size: 2.2em;
        font-weight: bold;
        color: {accent_color};
        margin: 10px 0;
    }}

    .metric-label {{
        font-size: 0.95em;
        color: {muted_color};
        text-transform: uppercase;
        letter-spacing: 1px;
    }}

    .metric-unit {{
        font-size: 0.8em;
        color: {muted_color};
    }}

    .visualization {{
        background: {chart_bg};
        border: 1px solid {border_color};
        border-radius: 6px;
        padding: 20px;
        margin: 20px 0;
        text-align: center;
    }}

    .visualization img {{
        max-width: 100%;
        height: auto;
        border-radius: 4px;
    }}

    table {{
        width: 100%;
        border-collapse: collapse;
        margin: 20px 0;
    }}

    thead {{
        background: {table_header_bg};
        color: white;
    }}

    th {{
        padding: 12px;
        text-align: left;
        font-weight: 600;
    }}

    td {{
        padding: 12px;
        border-bottom: 1px solid {border_color};
    }}

    tbody tr:hover {{
        background: {table_hover_bg};
    }}

    .status-badge {{
        display: inline-block;
        padding: 5px 12px;
        border-radius: 20px;
        font-size: 0.85em;
        font-weight: bold;
    }}

    .status-success {{
        background: #d4edda;
        color: #155724;
    }}

    .status-warning {{
        background: #fff3cd;
        color: #856404;
    }}

    .status-error {{
        background: #f8d7da;
        color: #721c24;
    }}

    .status-info {{
        background: #d1ecf1;
        color: #0c5460;
    }}

    .tag {{
        display: inline-block;
        background: {tag_bg};
        color: {tag_color};
        padding: 5px 10px;
        border-radius: 4px;
        margin: 5px 5px 5px 0;
        font-size: 0.85em;
    }}

    footer {{
        background: {footer_bg};
        color: {footer_text};
        padding: 30px 20px;
        text-align: center;
        border-top: 1px solid {border_color};
        margin-top: 40px;
        border-radius: 0 0 8px 8px;
    }}

    footer p {{
        margin: 5px 0;
        font-size: 0.9em;
    }}

    .footer-links {{
        margin-top: 15px;
    }}

    .footer-links a {{
        color: {accent_color};
        text-decoration: none;
        margin: 0 10px;
    }}

    .footer-links a:hover {{
        text-decoration: underline;
    }}

    @media (max-width: 768px) {{
        header h1 {{
            font-size: 1.8em;
        }}

        .metrics-grid {{
            grid-template-columns: 1fr;
        }}

        nav ul {{
            flex-direction: column;
        }}

        nav li {{
            min-width: 100%;
        }}

        .metadata {{
            grid-template-columns: 1fr;
        }}
    }}
"#,
        font_family = palette.require(StyleRole::FontFamily)?,
        text_color = palette.require(StyleRole::TextColor)?,
        bg_color = palette.require(StyleRole::BgColor)?,
        header_bg_start = palette.require(StyleRole::HeaderBgStart)?,
        header_bg_end = palette.require(StyleRole::HeaderBgEnd)?,
        nav_bg = palette.require(StyleRole::NavBg)?,
        nav_link_color = palette.require(StyleRole::NavLinkColor)?,
        accent_color = palette.require(StyleRole::AccentColor)?,
        section_bg = palette.require(StyleRole::SectionBg)?,
        heading_color = palette.require(StyleRole::HeadingColor)?,
        card_bg = palette.require(StyleRole::CardBg)?,
        border_color = palette.require(StyleRole::BorderColor)?,
        muted_color = palette.require(StyleRole::MutedColor)?,
        chart_bg = palette.require(StyleRole::ChartBg)?,
        table_header_bg = palette.require(StyleRole::TableHeaderBg)?,
        table_hover_bg = palette.require(StyleRole::TableHoverBg)?,
        tag_bg = palette.require(StyleRole::TagBg)?,
        tag_color = palette.require(StyleRole::TagColor)?,
        footer_bg = palette.require(StyleRole::FooterBg)?,
        footer_text = palette.require(StyleRole::FooterText)?,
    ))
}

/// Inline JavaScript placeholder
fn inline_javascript() -> &'static str {
    r#"
    document.addEventListener('DOMContentLoaded', function() {
        console.log('Report loaded successfully');
    });
    "#
}

/// Render header section
fn render_header(
    text: &TextRenderer,
    title: &str,
    description: Option<&str>,
    metadata: &Metadata,
    logo: Option<&str>,
) -> String {
    // Empty values are skipped; the grid is omitted when nothing remains
    let items: String = metadata
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            format!(
                r#"<div class="metadata-item"><span class="metadata-label">{}:</span> {}</div>"#,
                text.render(key),
                text.render(value),
            )
        })
        .collect();
    let metadata_html = if items.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="metadata">{}</div>"#, items)
    };

    let desc_html = description
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="subtitle">{}</p>"#, text.render(d)))
        .unwrap_or_default();

    let logo_html = logo
        .map(|src| format!(r#"<img class="logo" src="{}" alt="Logo">"#, text.render(src)))
        .unwrap_or_default();

    format!(
        r#"
    <header>
        {logo}<h1>{title}</h1>
        {desc}
        {metadata}
    </header>
    "#,
        logo = logo_html,
        title = text.render(title),
        desc = desc_html,
        metadata = metadata_html,
    )
}

/// Render navigation with one anchor link per section, in caller order
fn render_navigation(text: &TextRenderer, sections: &[String]) -> String {
    let items: String = sections
        .iter()
        .map(|section| {
            format!(
                r##"<li><a href="#{}">{}</a></li>"##,
                text.render(section),
                text.render(&title_case(section))
            )
        })
        .collect();

    format!(
        r#"
    <nav>
        <ul>
            {items}
        </ul>
    </nav>
    "#
    )
}

/// Render footer
fn render_footer(text: &TextRenderer, tags: &[String], year: i32) -> String {
    let tags_html = if tags.is_empty() {
        String::new()
    } else {
        let chips: String = tags
            .iter()
            .map(|tag| format!(r#"<span class="tag">{}</span>"#, text.render(tag)))
            .collect();
        format!(
            r#"
        <p>
            <strong>Tags:</strong><br>
            {chips}
        </p>
        "#
        )
    };

    format!(
        r##"
    <footer>
        {tags_html}
        <p>&copy; {year} Analysis Report. All rights reserved.</p>
        <div class="footer-links">
            <a href="#">Documentation</a>
            <a href="#">Report Issue</a>
            <a href="#">Contact Support</a>
        </div>
    </footer>
    "##
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
