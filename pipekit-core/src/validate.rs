//! Structural checks on a rendered report
//!
//! These are cheap string checks, not an HTML parser. They catch truncated
//! writes and missing sections.

use crate::section::Section;
use std::fmt;

/// A single problem found in a rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingDoctype,
    UnterminatedDocument,
    MissingElement(&'static str),
    MissingSectionAnchor(Section),
    MissingNavLink(Section),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingDoctype => write!(f, "document does not start with <!DOCTYPE html>"),
            ValidationIssue::UnterminatedDocument => write!(f, "document does not end with </html>"),
            ValidationIssue::MissingElement(tag) => write!(f, "missing <{}> element", tag),
            ValidationIssue::MissingSectionAnchor(section) => {
                write!(f, "section '{}' has no id=\"{}\" anchor", section.id(), section.id())
            }
            ValidationIssue::MissingNavLink(section) => {
                write!(f, "section '{}' has no navigation link", section.id())
            }
        }
    }
}

/// Check a rendered document against the sections it was asked to contain.
///
/// Unknown section identifiers are ignored; they never produce a fragment.
/// An empty result means the document passed.
pub fn validate_report(html: &str, sections: &[String]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !html.trim_start().starts_with("<!DOCTYPE html>") {
        issues.push(ValidationIssue::MissingDoctype);
    }
    if !html.trim_end().ends_with("</html>") {
        issues.push(ValidationIssue::UnterminatedDocument);
    }
    for tag in ["header", "nav", "footer"] {
        if !html.contains(&format!("<{}>", tag)) {
            issues.push(ValidationIssue::MissingElement(tag));
        }
    }

    for section in sections.iter().filter_map(|s| Section::parse(s)) {
        if !html.contains(&format!(r#"id="{}""#, section.id())) {
            issues.push(ValidationIssue::MissingSectionAnchor(section));
        }
        let link_present = sections
            .iter()
            .filter(|s| Section::parse(s) == Some(section))
            .any(|s| html.contains(&format!(r##"href="#{}""##, s)));
        if !link_present {
            issues.push(ValidationIssue::MissingNavLink(section));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_html_report;
    use crate::report::ReportRequest;
    use chrono::NaiveDate;

    fn render(sections: Option<Vec<String>>) -> String {
        let mut request = ReportRequest::new("Validation");
        request.sections = sections;
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        render_html_report(&request, at).unwrap()
    }

    #[test]
    fn test_rendered_report_is_valid() {
        let sections: Vec<String> = Section::ALL.iter().map(|s| s.id().to_string()).collect();
        let html = render(Some(sections.clone()));
        assert_eq!(validate_report(&html, &sections), vec![]);
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let sections = vec!["summary".to_string(), "appendix".to_string()];
        let html = render(Some(sections.clone()));
        assert!(validate_report(&html, &sections).is_empty());
    }

    #[test]
    fn test_truncated_document() {
        let sections = vec!["summary".to_string()];
        let html = render(Some(sections.clone()));
        let cut = &html[..html.len() / 2];
        let issues = validate_report(cut, &sections);
        assert!(issues.contains(&ValidationIssue::UnterminatedDocument));
        assert!(issues.contains(&ValidationIssue::MissingElement("footer")));
    }

    #[test]
    fn test_missing_section_detected() {
        let html = render(Some(vec!["summary".to_string()]));
        let issues = validate_report(&html, &["quality".to_string()]);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingSectionAnchor(Section::Quality),
                ValidationIssue::MissingNavLink(Section::Quality),
            ]
        );
    }

    #[test]
    fn test_not_html() {
        let issues = validate_report("hello", &[]);
        assert_eq!(issues.len(), 5);
        assert_eq!(issues[0], ValidationIssue::MissingDoctype);
        assert_eq!(issues[0].to_string(), "document does not start with <!DOCTYPE html>");
    }
}
