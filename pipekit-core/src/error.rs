//! Typed errors surfaced by the core library

use crate::theme::StyleRole;
use thiserror::Error;

/// Failure while turning `name=path` tokens into a derivatives mapping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivativesError {
    #[error(
        "Invalid derivatives argument: {token}. Expected format: name=path (e.g., preprocessed=/path/to/data)"
    )]
    InvalidToken { token: String },
}

/// Failure while rendering an HTML report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The palette lacks a role that the CSS template references
    #[error("palette is missing style role '{}'", .0.key())]
    MissingStyleRole(StyleRole),
}
