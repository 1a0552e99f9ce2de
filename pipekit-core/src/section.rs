//! Report sections and their placeholder fragments

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Version string embedded in the metadata section
pub const GENERATOR_VERSION: &str = "1.0.0";

/// Sections rendered when the caller does not choose any
pub const DEFAULT_SECTIONS: [Section; 3] =
    [Section::Summary, Section::Metrics, Section::Visualizations];

/// The closed set of report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Metrics,
    Visualizations,
    Quality,
    Metadata,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Metrics,
        Section::Visualizations,
        Section::Quality,
        Section::Metadata,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Metrics => "metrics",
            Section::Visualizations => "visualizations",
            Section::Quality => "quality",
            Section::Metadata => "metadata",
        }
    }

    /// Case-insensitive lookup of a section identifier
    pub fn parse(identifier: &str) -> Option<Section> {
        let lowered = identifier.to_lowercase();
        Section::ALL.into_iter().find(|s| s.id() == lowered)
    }

    /// Placeholder HTML for this section
    pub fn render(self, generated_at: &NaiveDateTime) -> String {
        match self {
            Section::Summary => render_summary(),
            Section::Metrics => render_metrics(),
            Section::Visualizations => render_visualizations(),
            Section::Quality => render_quality(),
            Section::Metadata => render_metadata(generated_at),
        }
    }
}

/// Fragment for an arbitrary identifier; unknown identifiers render empty
pub fn render_section(identifier: &str, generated_at: &NaiveDateTime) -> String {
    match Section::parse(identifier) {
        Some(section) => section.render(generated_at),
        None => {
            log::debug!("no fragment for section '{}'", identifier);
            String::new()
        }
    }
}

/// Title-case an identifier the way navigation labels expect: the first
/// letter of every alphabetic run is upper-cased, the rest lower-cased.
pub fn title_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut at_word_start = true;
    for c in identifier.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn render_summary() -> String {
    r#"
    <section id="summary" class="section">
        <h2>Summary</h2>
        <p>This section provides an overview of the analysis results and key findings.</p>
        <div class="metrics-grid">
            <div class="metric-card">
                <div class="metric-label">Status</div>
                <div class="metric-value"><span class="status-badge status-success">Complete</span></div>
            </div>
            <div class="metric-card">
                <div class="metric-label">Processing Time</div>
                <div class="metric-value">2<span class="metric-unit">h 15m</span></div>
            </div>
            <div class="metric-card">
                <div class="metric-label">Data Points</div>
                <div class="metric-value">10,240</div>
            </div>
        </div>
    </section>
    "#
    .to_string()
}

fn render_metrics() -> String {
    r#"
    <section id="metrics" class="section">
        <h2>Analysis Metrics</h2>
        <p>Quantitative measurements and key performance indicators.</p>
        <div class="metrics-grid">
            <div class="metric-card">
                <div class="metric-label">Metric One</div>
                <div class="metric-value">0.92</div>
            </div>
            <div class="metric-card">
                <div class="metric-label">Metric Two</div>
                <div class="metric-value">87.5<span class="metric-unit">%</span></div>
            </div>
            <div class="metric-card">
                <div class="metric-label">Metric Three</div>
                <div class="metric-value">156<span class="metric-unit">ms</span></div>
            </div>
            <div class="metric-card">
                <div class="metric-label">Metric Four</div>
                <div class="metric-value">p &lt; 0.001</div>
            </div>
        </div>
    </section>
    "#
    .to_string()
}

fn render_visualizations() -> String {
    r#"
    <section id="visualizations" class="section">
        <h2>Visualizations</h2>
        <p>Graphical representations of analysis results and trends.</p>
        <div class="visualization">
            <p style="color: #999; font-size: 1.2em; padding: 40px;">
                [Chart/Graph/Plot Placeholder]
            </p>
        </div>
        <div class="visualization">
            <p style="color: #999; font-size: 1.2em; padding: 40px;">
                [Visualization Placeholder]
            </p>
        </div>
    </section>
    "#
    .to_string()
}

fn render_quality() -> String {
    let checks = [
        (
            "Data Completeness",
            "success",
            "Pass",
            "100% of expected data present",
        ),
        (
            "Value Range Validation",
            "success",
            "Pass",
            "All values within expected ranges",
        ),
        (
            "Format Compliance",
            "warning",
            "Warning",
            "Minor formatting inconsistencies detected",
        ),
    ];
    let rows: String = checks
        .iter()
        .map(|(check, status, label, details)| {
            format!(
                r#"
                <tr>
                    <td>{check}</td>
                    <td><span class="status-badge status-{status}">{label}</span></td>
                    <td>{details}</td>
                </tr>"#
            )
        })
        .collect();

    format!(
        r#"
    <section id="quality" class="section">
        <h2>Quality Assessment</h2>
        <p>Data quality evaluation and validation results.</p>
        <table>
            <thead>
                <tr>
                    <th>Check</th>
                    <th>Result</th>
                    <th>Details</th>
                </tr>
            </thead>
            <tbody>{rows}
            </tbody>
        </table>
    </section>
    "#
    )
}

fn render_metadata(generated_at: &NaiveDateTime) -> String {
    format!(
        r#"
    <section id="metadata" class="section">
        <h2>Metadata</h2>
        <p>Information about the analysis execution and configuration.</p>
        <table>
            <thead>
                <tr>
                    <th>Parameter</th>
                    <th>Value</th>
                </tr>
            </thead>
            <tbody>
                <tr>
                    <td>Generated Date</td>
                    <td>{generated}</td>
                </tr>
                <tr>
                    <td>Generator Version</td>
                    <td>{version}</td>
                </tr>
                <tr>
                    <td>Input Source</td>
                    <td>Analysis output directory</td>
                </tr>
                <tr>
                    <td>Configuration</td>
                    <td>Default template</td>
                </tr>
            </tbody>
        </table>
    </section>
    "#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        version = GENERATOR_VERSION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frozen() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 30, 5))
            .unwrap()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Section::parse("summary"), Some(Section::Summary));
        assert_eq!(Section::parse("QUALITY"), Some(Section::Quality));
        assert_eq!(Section::parse("Visualizations"), Some(Section::Visualizations));
        assert_eq!(Section::parse("appendix"), None);
    }

    #[test]
    fn test_each_fragment_carries_its_anchor() {
        for section in Section::ALL {
            let html = section.render(&frozen());
            assert!(
                html.contains(&format!(r#"<section id="{}" class="section">"#, section.id())),
                "missing anchor for {}",
                section.id()
            );
        }
    }

    #[test]
    fn test_mixed_case_identifier_uses_lowercase_id() {
        let html = render_section("Summary", &frozen());
        assert!(html.contains(r#"id="summary""#));
    }

    #[test]
    fn test_unknown_identifier_renders_empty() {
        assert_eq!(render_section("appendix", &frozen()), "");
    }

    #[test]
    fn test_metadata_embeds_generated_date_and_version() {
        let html = Section::Metadata.render(&frozen());
        assert!(html.contains("<td>2024-01-15 09:30:05</td>"));
        assert!(html.contains("<td>1.0.0</td>"));
    }

    #[test]
    fn test_quality_rows() {
        let html = Section::Quality.render(&frozen());
        assert_eq!(html.matches("<tr>").count(), 4);
        assert!(html.contains(r#"<span class="status-badge status-warning">Warning</span>"#));
        assert!(html.contains("<td>Data Completeness</td>"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("summary"), "Summary");
        assert_eq!(title_case("visualizations"), "Visualizations");
        assert_eq!(title_case("data_quality"), "Data_Quality");
        assert_eq!(title_case("QC report"), "Qc Report");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_default_sections() {
        let ids: Vec<&str> = DEFAULT_SECTIONS.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["summary", "metrics", "visualizations"]);
    }
}
