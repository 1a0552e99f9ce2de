//! Pipekit core library - pipeline argument resolution and HTML report generation

#![deny(warnings)]

// Global invariants enforced in this crate:
// - No global mutable state
// - No clocks: the generation timestamp is always passed in
// - Rendering performs no I/O; only config loading touches the filesystem
// - Map iteration order is explicit (IndexMap for user order, BTreeMap for roles)
// - Identical request and timestamp yield byte-for-byte identical output

pub mod config;
pub mod derivatives;
pub mod error;
pub mod html;
pub mod pipeline;
pub mod report;
pub mod section;
pub mod theme;
pub mod validate;

pub use derivatives::{parse_derivatives, DerivativesMap};
pub use error::{DerivativesError, ReportError};
pub use html::render_html_report;
pub use pipeline::{PipelineOptions, PipelineSettings, Strategy};
pub use report::{ReportOptions, ReportRequest, TextEscaping};
pub use section::Section;
pub use theme::{build_palette, Palette, PaletteOverrides, StyleRole, Theme};
pub use validate::{validate_report, ValidationIssue};
